pub mod config;
pub mod decoder;
pub mod model;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod post_processing;
pub mod vocabulary;

pub use config::CaptionConfig;
pub use decoder::{
    calibrate, normalized_temperature, top_k, DecodeLoop, DecodeOutcome, StepDecision, Termination,
};
pub use model::{CaptionModel, RecurrentState, StepOutput};
#[cfg(feature = "onnx")]
pub use onnx::{OrtCaptionModel, TensorNames};
pub use post_processing::clean;
pub use vocabulary::{Vocabulary, END_INDEX, START_INDEX};

/// Shown whenever no usable caption can be produced.
pub const FALLBACK_CAPTION: &str = "I can't identify the main object in this photo.";
