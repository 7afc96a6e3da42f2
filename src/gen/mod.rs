pub mod client;
pub mod parser;

pub use client::ContentGenClient;
pub use parser::{parse_questions, strip_code_fence};
