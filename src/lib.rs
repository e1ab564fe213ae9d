pub mod archive;
pub mod config;
pub mod package;
pub mod release;
pub mod runtime;
pub mod server;
pub mod toolchain;
