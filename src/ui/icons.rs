pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const HEART: &str = "❤️";
    pub const PASS: &str = "👋";
    pub const MUTUAL: &str = "💞";
    pub const PAGE: &str = "📄";
    pub const EMPTY: &str = "∅";
}
