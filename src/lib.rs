pub mod config;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod hls;
pub mod render;
pub mod tail;
pub mod terminal;

pub use config::TailConfig;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
