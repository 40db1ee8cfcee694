pub mod cli;
pub mod config;
pub mod descriptor;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;

pub use error::{Error, Result};
