pub mod adapter;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
