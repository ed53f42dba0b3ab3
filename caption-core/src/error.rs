use thiserror::Error;

/// Errors raised while producing a caption.
///
/// None of these escape [`crate::CaptionDecoder::caption`]; they surface only
/// through the fallible entry points and the logs.
#[derive(Error, Debug)]
pub enum CaptionError {
    #[cfg(feature = "onnx")]
    #[error("ORT error: {0}")]
    Ort(#[from] ort::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ndarray shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Model output not found: {0}")]
    OutputNotFound(String),

    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("Model stage failed: {0}")]
    Stage(String),

    #[error("Invalid caption config: {0}")]
    Config(#[from] serde_json::Error),
}

impl CaptionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            #[cfg(feature = "onnx")]
            Self::Ort(_) => "The captioning model failed to run. Try again.",
            Self::Shape(_) | Self::OutputNotFound(_) | Self::Stage(_) => {
                "The captioning model failed to run. Try again."
            }
            Self::Io(_) | Self::InvalidVocabulary(_) => {
                "The caption word list could not be read. Captions may be unavailable."
            }
            Self::Config(_) => "The caption settings are invalid. Defaults will be used.",
        }
    }
}
