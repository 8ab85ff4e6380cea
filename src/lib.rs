pub mod api;
pub mod config;
pub mod error;
pub mod page;
pub mod tui;
pub mod widgets;

pub use error::{Error, Result};
