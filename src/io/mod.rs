pub mod config_io;
pub mod credentials;
pub mod gateway;
pub mod logging;
