pub mod engine;
pub mod token;

pub use engine::LikeQueryEngine;
pub use token::{PageToken, TokenPolicy};
