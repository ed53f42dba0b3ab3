//! High-level caption decoder facade.

use std::time::Instant;

use ndarray::ArrayView3;

use crate::caption::{
    clean, CaptionConfig, CaptionModel, DecodeLoop, DecodeOutcome, Termination, Vocabulary,
    FALLBACK_CAPTION,
};
use crate::error::CaptionError;

/// A decoded caption with the tokens it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    /// Committed token indices, without `START` and `END`.
    pub tokens: Vec<usize>,
    /// `None` when decoding ran out of usable candidates.
    pub termination: Option<Termination>,
}

impl Caption {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_CAPTION.to_string(),
            tokens: Vec::new(),
            termination: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.text == FALLBACK_CAPTION
    }
}

/// Turns images into captions through an encoder/decoder [`CaptionModel`].
///
/// Holds no locks: `&mut self` on every request keeps one decode per model in
/// flight. Hosts sharing a decoder across threads wrap it in a `Mutex`.
pub struct CaptionDecoder<M> {
    model: M,
    vocabulary: Vocabulary,
    config: CaptionConfig,
}

impl<M: CaptionModel> CaptionDecoder<M> {
    pub fn new(model: M, vocabulary: Vocabulary) -> Self {
        Self::with_config(model, vocabulary, CaptionConfig::default())
    }

    pub fn with_config(model: M, vocabulary: Vocabulary, config: CaptionConfig) -> Self {
        if vocabulary.is_empty() {
            log::warn!("Caption decoder created with an empty vocabulary; captions will fall back");
        }
        Self {
            model,
            vocabulary,
            config,
        }
    }

    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Captions `image` with the decoder's own config. Never fails.
    ///
    /// Stage errors become the fallback sentence. A panic inside the
    /// [`CaptionModel`] is outside this contract and unwinds (or aborts)
    /// through the caller.
    pub fn caption(&mut self, image: ArrayView3<'_, f32>) -> String {
        let config = self.config.clone();
        self.caption_with_config(image, &config)
    }

    /// Captions `image` with a per-request config. Model failures are logged
    /// and replaced by the fallback sentence; stage panics are not caught.
    pub fn caption_with_config(
        &mut self,
        image: ArrayView3<'_, f32>,
        config: &CaptionConfig,
    ) -> String {
        match self.describe_with_config(image, config) {
            Ok(caption) => caption.text,
            Err(err) => {
                log::error!("Captioning failed: {err}");
                FALLBACK_CAPTION.to_string()
            }
        }
    }

    pub fn describe(&mut self, image: ArrayView3<'_, f32>) -> Result<Caption, CaptionError> {
        let config = self.config.clone();
        self.describe_with_config(image, &config)
    }

    /// Fallible variant of [`CaptionDecoder::caption_with_config`] exposing
    /// the decoded tokens and how decoding ended.
    pub fn describe_with_config(
        &mut self,
        image: ArrayView3<'_, f32>,
        config: &CaptionConfig,
    ) -> Result<Caption, CaptionError> {
        let start = Instant::now();

        let initial_state = self.model.encode(image)?;
        let outcome = DecodeLoop::new(&self.vocabulary, config).run(&mut self.model, initial_state)?;
        let caption = self.finish(&outcome);

        log::debug!(
            "Caption inference completed in {:?}: '{}'",
            start.elapsed(),
            caption.text
        );
        Ok(caption)
    }

    fn finish(&self, outcome: &DecodeOutcome) -> Caption {
        let termination = match outcome {
            DecodeOutcome::Finished { termination, .. } => *termination,
            DecodeOutcome::Fallback => return Caption::fallback(),
        };

        let tokens = outcome.content_tokens().to_vec();
        let words: Vec<&str> = tokens
            .iter()
            .map(|&idx| self.vocabulary.word_at(idx))
            .filter(|word| !word.trim().is_empty())
            .collect();

        Caption {
            text: clean(&words),
            tokens,
            termination: Some(termination),
        }
    }
}
