pub mod common;
pub mod config;
pub mod plan;

pub type Error = crate::common::error::EnsembleError;
pub type Result<T> = std::result::Result<T, Error>;

pub const ENSEMBLE_VERSION: &str = env!("CARGO_PKG_VERSION");
