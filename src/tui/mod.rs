pub mod app;
pub mod input;
pub mod page;
pub mod render;
pub mod session;
pub mod theme;
pub mod wrap;

pub use app::run;
