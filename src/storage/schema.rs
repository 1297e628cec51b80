//! Database schema definitions

/// SQL to create the decisions table
///
/// `updated_at` holds microseconds since the Unix epoch. `WITHOUT ROWID`
/// keeps rows clustered on the `(actor, recipient)` key.
pub const CREATE_DECISIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS decisions (
    actor_user_id     TEXT    NOT NULL,
    recipient_user_id TEXT    NOT NULL,
    liked_recipient   INTEGER NOT NULL CHECK (liked_recipient IN (0, 1)),
    updated_at        INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER) * 1000000),
    PRIMARY KEY (actor_user_id, recipient_user_id)
) WITHOUT ROWID
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_decisions_recipient ON decisions(recipient_user_id)",
    "CREATE INDEX IF NOT EXISTS idx_decisions_updated_at ON decisions(updated_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_decisions_recipient_liked ON decisions(recipient_user_id, liked_recipient)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_DECISIONS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
