use std::time::Instant;

use ndarray::{Array1, ArrayView3, ArrayViewD, Axis};
use ort::inputs;
use ort::session::Session;
use ort::value::TensorRef;

use crate::error::CaptionError;

use super::model::{CaptionModel, RecurrentState, StepOutput};

/// Graph tensor names of the exported encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorNames {
    pub image_feed: String,
    pub initial_state: String,
    pub input_feed: String,
    pub state_feed: String,
    pub softmax: String,
    pub state: String,
}

impl Default for TensorNames {
    fn default() -> Self {
        Self {
            image_feed: "import/image_feed".into(),
            initial_state: "import/lstm/initial_state".into(),
            input_feed: "import/input_feed".into(),
            state_feed: "import/lstm/state_feed".into(),
            softmax: "import/softmax".into(),
            state: "import/lstm/state".into(),
        }
    }
}

/// [`CaptionModel`] backed by two ONNX Runtime sessions built by the host.
pub struct OrtCaptionModel {
    encoder: Session,
    decoder: Session,
    names: TensorNames,
}

impl OrtCaptionModel {
    pub fn new(encoder: Session, decoder: Session) -> Self {
        Self::with_names(encoder, decoder, TensorNames::default())
    }

    pub fn with_names(encoder: Session, decoder: Session, names: TensorNames) -> Self {
        Self {
            encoder,
            decoder,
            names,
        }
    }

    pub fn names(&self) -> &TensorNames {
        &self.names
    }
}

impl Drop for OrtCaptionModel {
    fn drop(&mut self) {
        log::debug!("Dropping caption model sessions");
    }
}

impl CaptionModel for OrtCaptionModel {
    fn encode(&mut self, image: ArrayView3<'_, f32>) -> Result<RecurrentState, CaptionError> {
        let image = image.as_standard_layout();
        let start = Instant::now();
        let outputs = self.encoder.run(inputs![
            self.names.image_feed.as_str() => TensorRef::from_array_view(image.view())?,
        ])?;
        log::debug!("Caption encoder inference completed in {:?}", start.elapsed());

        let initial = outputs
            .get(self.names.initial_state.as_str())
            .ok_or_else(|| CaptionError::OutputNotFound(self.names.initial_state.clone()))?
            .try_extract_array::<f32>()?;
        Ok(flatten(initial))
    }

    fn decode_step(
        &mut self,
        token: usize,
        state: &RecurrentState,
    ) -> Result<StepOutput, CaptionError> {
        let input_feed = Array1::from_vec(vec![token as i64]);
        let state_feed = state.as_standard_layout();
        let state_feed = state_feed.view().insert_axis(Axis(0));

        let outputs = self.decoder.run(inputs![
            self.names.input_feed.as_str() => TensorRef::from_array_view(input_feed.view())?,
            self.names.state_feed.as_str() => TensorRef::from_array_view(state_feed)?,
        ])?;

        let softmax = outputs
            .get(self.names.softmax.as_str())
            .ok_or_else(|| CaptionError::OutputNotFound(self.names.softmax.clone()))?
            .try_extract_array::<f32>()?;
        let next_state = outputs
            .get(self.names.state.as_str())
            .ok_or_else(|| CaptionError::OutputNotFound(self.names.state.clone()))?
            .try_extract_array::<f32>()?;

        Ok(StepOutput {
            probabilities: softmax.iter().copied().collect(),
            state: flatten(next_state),
        })
    }
}

fn flatten(view: ArrayViewD<'_, f32>) -> RecurrentState {
    view.iter().copied().collect()
}
