pub mod config;
pub mod domain;
pub mod error;
pub mod github;
pub mod orchestrator;
pub mod ui;

pub use error::{Result, TagActionError};
