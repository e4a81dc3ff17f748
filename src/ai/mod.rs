pub mod client;
pub mod parse;
pub mod prompts;

pub use client::*;
