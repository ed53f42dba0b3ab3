use crate::caption::model::RecurrentState;
use crate::caption::vocabulary::{END_INDEX, START_INDEX};

/// Working state of one in-flight caption.
#[derive(Debug, Clone)]
pub struct CaptionState {
    /// Committed tokens, starting with `START`.
    pub tokens: Vec<usize>,
    pub state: RecurrentState,
    pub step: usize,
}

impl CaptionState {
    pub fn new(initial_state: RecurrentState) -> Self {
        Self {
            tokens: vec![START_INDEX],
            state: initial_state,
            step: 0,
        }
    }

    /// Token to feed the decoder next: the last committed one.
    pub fn last_token(&self) -> usize {
        self.tokens.last().copied().unwrap_or(START_INDEX)
    }
}

/// What a single decoder step resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepDecision {
    /// Top probability fell below the confidence threshold; only the state advances.
    Skip { best_prob: f32 },
    /// Commit `index` (possibly a lower-ranked candidate recovered from OOV).
    Append { index: usize, prob: f32 },
    /// No top-K candidate maps to a usable word.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The decoder emitted `END`.
    End,
    MaxSteps,
}

/// Terminal state of a decode.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Finished {
        tokens: Vec<usize>,
        termination: Termination,
    },
    Fallback,
}

impl DecodeOutcome {
    /// Committed tokens without the leading `START` and the trailing `END`.
    pub fn content_tokens(&self) -> &[usize] {
        match self {
            Self::Finished { tokens, .. } => {
                let body = tokens.strip_prefix(&[START_INDEX]).unwrap_or(tokens);
                body.strip_suffix(&[END_INDEX]).unwrap_or(body)
            }
            Self::Fallback => &[],
        }
    }
}
