pub mod mode;
pub mod server;
