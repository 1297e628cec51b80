use tabled::{settings::Style, Table, Tabled};

use crate::Liker;

#[derive(Tabled)]
pub struct LikerRow {
    #[tabled(rename = "#")]
    pub position: u64,
    #[tabled(rename = "Actor")]
    pub actor: String,
    #[tabled(rename = "Liked at (unix)")]
    pub liked_at: u64,
}

/// Tabulates a page of likers; `first_position` is the page's offset
pub struct LikerTable {
    rows: Vec<LikerRow>,
}

impl LikerTable {
    pub fn new(likers: &[Liker], first_position: u64) -> Self {
        let rows = likers
            .iter()
            .zip(first_position + 1..)
            .map(|(liker, position)| LikerRow {
                position,
                actor: liker.actor_id.clone(),
                liked_at: liker.unix_timestamp,
            })
            .collect();
        Self { rows }
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}
