//! Error types for RoomSense

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomSenseError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Effect sink error: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, RoomSenseError>;
