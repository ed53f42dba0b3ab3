use crate::caption::config::CaptionConfig;
use crate::caption::model::{CaptionModel, RecurrentState};
use crate::caption::vocabulary::Vocabulary;
use crate::error::CaptionError;

use super::scoring::{calibrate, top_k};
use super::state::{CaptionState, DecodeOutcome, StepDecision, Termination};

/// Confidence-gated greedy decoding over a recurrent caption decoder.
pub struct DecodeLoop<'a> {
    vocabulary: &'a Vocabulary,
    config: &'a CaptionConfig,
}

impl<'a> DecodeLoop<'a> {
    pub fn new(vocabulary: &'a Vocabulary, config: &'a CaptionConfig) -> Self {
        Self { vocabulary, config }
    }

    /// Drives the decoder from the encoder's `initial_state` until it emits
    /// `END`, exhausts `max_steps` or runs out of usable candidates.
    ///
    /// Makes at most `max_steps` calls to [`CaptionModel::decode_step`].
    pub fn run<M: CaptionModel + ?Sized>(
        &self,
        model: &mut M,
        initial_state: RecurrentState,
    ) -> Result<DecodeOutcome, CaptionError> {
        let mut caption = CaptionState::new(initial_state);
        let max_steps = self.config.max_steps;

        while caption.step < max_steps {
            let output = model.decode_step(caption.last_token(), &caption.state)?;

            match self.evaluate(caption.step, &output.probabilities) {
                StepDecision::Skip { best_prob } => {
                    log::warn!(
                        "Low confidence at step {} (best_prob={:.3}); skipping token",
                        caption.step,
                        best_prob
                    );
                    caption.state = output.state;
                }
                StepDecision::Append { index, .. } => {
                    caption.tokens.push(index);
                    caption.state = output.state;
                    if index == self.vocabulary.end_index() {
                        return Ok(DecodeOutcome::Finished {
                            tokens: caption.tokens,
                            termination: Termination::End,
                        });
                    }
                    log::debug!(
                        "Step {} committed index {} ('{}')",
                        caption.step,
                        index,
                        self.vocabulary.word_at(index)
                    );
                }
                StepDecision::Fallback => {
                    log::warn!(
                        "Top candidates at step {} map to OOV words; using fallback caption",
                        caption.step
                    );
                    return Ok(DecodeOutcome::Fallback);
                }
            }

            caption.step += 1;
        }

        Ok(DecodeOutcome::Finished {
            tokens: caption.tokens,
            termination: Termination::MaxSteps,
        })
    }

    /// Decides a single step from the decoder's raw probabilities.
    pub fn evaluate(&self, step: usize, probabilities: &[f32]) -> StepDecision {
        let calibrated = calibrate(probabilities, self.config.effective_temperature());
        let candidates = top_k(&calibrated, self.config.top_k);

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "step {} top{}: {}",
                step,
                self.config.top_k,
                self.describe_candidates(&candidates)
            );
        }

        let (best_idx, best_prob) = match candidates.first() {
            Some(&(idx, prob)) => (Some(idx), prob),
            None => (None, 0.0),
        };

        if best_prob < self.config.confidence_threshold {
            return StepDecision::Skip { best_prob };
        }

        if let Some(idx) = best_idx.filter(|&idx| !self.vocabulary.is_blank(idx)) {
            return StepDecision::Append {
                index: idx,
                prob: best_prob,
            };
        }

        let end_index = self.vocabulary.end_index();
        candidates
            .iter()
            .skip(1)
            .find(|&&(idx, _)| idx != end_index && !self.vocabulary.is_blank(idx))
            .map(|&(index, prob)| StepDecision::Append { index, prob })
            .unwrap_or(StepDecision::Fallback)
    }

    fn describe_candidates(&self, candidates: &[(usize, f32)]) -> String {
        candidates
            .iter()
            .map(|&(idx, prob)| {
                let word = self.vocabulary.word_at(idx);
                if word.trim().is_empty() {
                    format!("<OOV:{idx}>:{prob:.3}")
                } else {
                    format!("{word}:{prob:.3}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
