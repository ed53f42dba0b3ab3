use ndarray::{Array1, ArrayView3};

use crate::error::CaptionError;

/// Hidden state carried between decoder steps.
pub type RecurrentState = Array1<f32>;

/// Result of one decoder-stage call.
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// Probability per vocabulary index.
    pub probabilities: Vec<f32>,
    pub state: RecurrentState,
}

/// The two network stages a caption is decoded from.
///
/// Implementations are not required to be reentrant; a decoder drives one
/// caption at a time through `&mut self`.
pub trait CaptionModel {
    /// Runs the image encoder (height × width × channel) and returns the
    /// decoder's initial state.
    fn encode(&mut self, image: ArrayView3<'_, f32>) -> Result<RecurrentState, CaptionError>;

    /// Runs one recurrent decoder step for `token` from `state`.
    fn decode_step(
        &mut self,
        token: usize,
        state: &RecurrentState,
    ) -> Result<StepOutput, CaptionError>;
}

impl<M: CaptionModel + ?Sized> CaptionModel for Box<M> {
    fn encode(&mut self, image: ArrayView3<'_, f32>) -> Result<RecurrentState, CaptionError> {
        (**self).encode(image)
    }

    fn decode_step(
        &mut self,
        token: usize,
        state: &RecurrentState,
    ) -> Result<StepOutput, CaptionError> {
        (**self).decode_step(token, state)
    }
}
