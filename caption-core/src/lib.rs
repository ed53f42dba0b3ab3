pub mod caption;
mod engine;
pub mod error;

pub use caption::{CaptionConfig, CaptionModel, RecurrentState, StepOutput, Vocabulary};
pub use engine::{Caption, CaptionDecoder};
pub use error::CaptionError;
