//! Terminal front end for the prediction page

pub mod app;
pub mod render;
pub mod theme;

pub use app::App;
pub use theme::Theme;
