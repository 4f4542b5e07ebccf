//! Crate error type
//!
//! Only configuration parsing can fail. Classification and signal
//! collection degrade instead of erroring.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown preset: {0} (expected minimal, standard or comprehensive)")]
    UnknownPreset(String),

    #[error("Unknown signal: {0}")]
    UnknownSignal(String),

    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
