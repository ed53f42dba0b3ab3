pub(crate) mod scoring;
pub(crate) mod search;
pub(crate) mod state;

pub use scoring::{calibrate, normalized_temperature, top_k};
pub use search::DecodeLoop;
pub use state::{CaptionState, DecodeOutcome, StepDecision, Termination};
