#![allow(dead_code)]

use lumen_caption_lib::{CaptionError, CaptionModel, RecurrentState, StepOutput, Vocabulary};
use ndarray::{Array1, Array3, ArrayView3};

pub const VOCAB_SIZE: usize = 30;
pub const DOG: usize = 5;
pub const RUNS: usize = 9;

/// `<unk> <S> </S> a on dog the red car runs w10 .. w29`
pub fn test_vocabulary() -> Vocabulary {
    let mut words: Vec<String> = [
        "<unk>", "<S>", "</S>", "a", "on", "dog", "the", "red", "car", "runs",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    words.extend((words.len()..VOCAB_SIZE).map(|i| format!("w{i}")));
    Vocabulary::new(words)
}

pub fn word_index(vocab: &Vocabulary, word: &str) -> usize {
    (0..vocab.len())
        .find(|&i| vocab.word_at(i) == word)
        .unwrap_or_else(|| panic!("'{word}' not in test vocabulary"))
}

pub fn one_hot(idx: usize) -> Vec<f32> {
    let mut probs = vec![0.0; VOCAB_SIZE];
    probs[idx] = 1.0;
    probs
}

pub fn uniform() -> Vec<f32> {
    vec![1.0 / VOCAB_SIZE as f32; VOCAB_SIZE]
}

pub fn image() -> Array3<f32> {
    Array3::zeros((4, 4, 3))
}

/// Replays fixed distributions in order, ignoring the state it is fed.
/// Once the script runs out the last distribution repeats.
pub struct ScriptedModel {
    script: Vec<Vec<f32>>,
    pub encode_calls: usize,
    pub fed_tokens: Vec<usize>,
    pub fed_states: Vec<RecurrentState>,
}

impl ScriptedModel {
    pub fn new(script: Vec<Vec<f32>>) -> Self {
        Self {
            script,
            encode_calls: 0,
            fed_tokens: Vec::new(),
            fed_states: Vec::new(),
        }
    }

    pub fn of_words(indices: &[usize]) -> Self {
        Self::new(indices.iter().map(|&i| one_hot(i)).collect())
    }
}

impl CaptionModel for ScriptedModel {
    fn encode(&mut self, _image: ArrayView3<'_, f32>) -> Result<RecurrentState, CaptionError> {
        self.encode_calls += 1;
        Ok(Array1::zeros(2))
    }

    fn decode_step(
        &mut self,
        token: usize,
        state: &RecurrentState,
    ) -> Result<StepOutput, CaptionError> {
        let step = self.fed_tokens.len();
        self.fed_tokens.push(token);
        self.fed_states.push(state.clone());
        let probabilities = self
            .script
            .get(step)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_else(uniform);
        Ok(StepOutput {
            probabilities,
            state: state.mapv(|v| v + 1.0),
        })
    }
}

/// Unsure until its state has advanced twice, then says "dog" and stops.
pub struct WarmupModel {
    pub fed_tokens: Vec<usize>,
}

impl CaptionModel for WarmupModel {
    fn encode(&mut self, _image: ArrayView3<'_, f32>) -> Result<RecurrentState, CaptionError> {
        Ok(Array1::zeros(1))
    }

    fn decode_step(
        &mut self,
        token: usize,
        state: &RecurrentState,
    ) -> Result<StepOutput, CaptionError> {
        self.fed_tokens.push(token);
        let warmth = state[0] as usize;
        let probabilities = match warmth {
            0 | 1 => uniform(),
            2 => one_hot(DOG),
            _ => one_hot(lumen_caption_lib::caption::END_INDEX),
        };
        Ok(StepOutput {
            probabilities,
            state: state.mapv(|v| v + 1.0),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Encode,
    DecodeStep(usize),
}

pub struct FailingModel {
    pub fail_at: FailAt,
    steps: usize,
}

impl FailingModel {
    pub fn new(fail_at: FailAt) -> Self {
        Self { fail_at, steps: 0 }
    }
}

impl CaptionModel for FailingModel {
    fn encode(&mut self, _image: ArrayView3<'_, f32>) -> Result<RecurrentState, CaptionError> {
        if self.fail_at == FailAt::Encode {
            return Err(CaptionError::Stage("encoder unavailable".into()));
        }
        Ok(Array1::zeros(1))
    }

    fn decode_step(
        &mut self,
        _token: usize,
        state: &RecurrentState,
    ) -> Result<StepOutput, CaptionError> {
        let step = self.steps;
        self.steps += 1;
        if self.fail_at == FailAt::DecodeStep(step) {
            return Err(CaptionError::Stage(format!("decoder failed at step {step}")));
        }
        Ok(StepOutput {
            probabilities: one_hot(DOG),
            state: state.clone(),
        })
    }
}
