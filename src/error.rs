use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum NNError {
    // Construction errors
    InvalidNetworkConfiguration(String),

    // Forward/backward errors
    DimensionMismatch(String),

    // Dataset errors
    DatasetNotFound(String),

    // Persistence errors
    ModelLoadError(String),
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl fmt::Display for NNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NNError::InvalidNetworkConfiguration(msg) => {
                write!(f, "Invalid network configuration: {}", msg)
            }
            NNError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            NNError::DatasetNotFound(msg) => write!(f, "Dataset file not found: {}", msg),
            NNError::ModelLoadError(msg) => write!(f, "Failed to load model: {}", msg),
            NNError::IoError(err) => write!(f, "I/O error: {}", err),
            NNError::SerializationError(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl From<std::io::Error> for NNError {
    fn from(err: std::io::Error) -> NNError {
        NNError::IoError(err)
    }
}

impl From<serde_json::Error> for NNError {
    fn from(err: serde_json::Error) -> NNError {
        NNError::SerializationError(err)
    }
}

impl Error for NNError {}

pub type Result<T> = std::result::Result<T, NNError>;
