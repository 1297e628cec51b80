pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    decision_outcome, dim, empty, error, header, info, next_page_hint, section, success,
};
pub use table::LikerTable;
pub use theme::{theme, Theme};
