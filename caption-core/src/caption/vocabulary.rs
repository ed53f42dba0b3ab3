use std::fs;
use std::path::Path;

use crate::error::CaptionError;

/// Index fed to the decoder on the first step.
pub const START_INDEX: usize = 1;
/// Index the decoder emits once the sentence is complete.
pub const END_INDEX: usize = 2;

/// Word list of the caption decoder, addressed by the model's token index.
///
/// Line order of the source file defines the index. Indices 0, 1 and 2 are
/// fixed by the exported model (reserved, `START`, `END`) and are not checked
/// against the file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a `word_counts.txt` style listing: one entry per line, first
    /// whitespace-separated field is the word. Blank lines keep their slot so
    /// later indices do not shift.
    pub fn parse(content: &str) -> Self {
        let words = content
            .lines()
            .map(|line| line.split_whitespace().next().unwrap_or_default().to_string())
            .collect();
        Self { words }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CaptionError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let vocab = Self::parse(&String::from_utf8_lossy(&bytes));
        if vocab.is_empty() {
            return Err(CaptionError::InvalidVocabulary(format!(
                "{} contains no entries",
                path.display()
            )));
        }

        log::info!(
            "Loaded caption vocabulary with {} words from {}",
            vocab.len(),
            path.display()
        );
        log::debug!(
            "Sentinel words: start='{}' end='{}'",
            vocab.word_at(START_INDEX),
            vocab.word_at(END_INDEX)
        );
        Ok(vocab)
    }

    /// Like [`Vocabulary::load`], but a missing or unreadable file degrades to
    /// an empty vocabulary. Every lookup is then blank and captions resolve to
    /// the fallback sentence.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(vocab) => vocab,
            Err(err) => {
                log::warn!(
                    "Failed to load caption vocabulary from {}: {err}",
                    path.as_ref().display()
                );
                Self::empty()
            }
        }
    }

    /// Word at `index`, or `""` when the index is out of range or unmapped.
    pub fn word_at(&self, index: usize) -> &str {
        self.words.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self, index: usize) -> bool {
        self.word_at(index).trim().is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn start_index(&self) -> usize {
        START_INDEX
    }

    pub fn end_index(&self) -> usize {
        END_INDEX
    }
}

impl FromIterator<String> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
