pub mod config;
pub mod node;
pub mod record;

pub use config::*;
pub use node::*;
pub use record::*;
