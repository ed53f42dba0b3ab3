use std::io::Write;

use lumen_caption_lib::caption::{END_INDEX, START_INDEX};
use lumen_caption_lib::{CaptionError, Vocabulary};
use tempfile::NamedTempFile;

fn write_vocab(content: &str) -> NamedTempFile {
    write_vocab_bytes(content.as_bytes())
}

fn write_vocab_bytes(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn load_reads_first_field_per_line() {
    let file = write_vocab("<unk> 1\n<S> 2000\n</S> 2000\na 900\ndog 12\n");
    let vocab = Vocabulary::load(file.path()).unwrap();
    assert_eq!(vocab.len(), 5);
    assert_eq!(vocab.word_at(START_INDEX), "<S>");
    assert_eq!(vocab.word_at(END_INDEX), "</S>");
    assert_eq!(vocab.word_at(4), "dog");
    assert_eq!(vocab.word_at(5), "");
}

#[test]
fn sentinel_indices_are_fixed() {
    let vocab = Vocabulary::parse("x\ny\nz\n");
    assert_eq!(vocab.start_index(), 1);
    assert_eq!(vocab.end_index(), 2);
    assert_eq!(Vocabulary::empty().start_index(), 1);
    assert_eq!(Vocabulary::empty().end_index(), 2);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Vocabulary::load(dir.path().join("word_counts.txt")).unwrap_err();
    assert!(matches!(err, CaptionError::Io(_)));
}

#[test]
fn empty_file_is_invalid() {
    let file = write_vocab("");
    let err = Vocabulary::load(file.path()).unwrap_err();
    assert!(matches!(err, CaptionError::InvalidVocabulary(_)));
}

#[test]
fn load_or_empty_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let vocab = Vocabulary::load_or_empty(dir.path().join("missing.txt"));
    assert!(vocab.is_empty());
    assert_eq!(vocab.word_at(0), "");
    assert_eq!(vocab.word_at(START_INDEX), "");
}

#[test]
fn load_or_empty_keeps_valid_file() {
    let file = write_vocab("<unk> 1\n<S> 2\n</S> 3\n");
    assert_eq!(Vocabulary::load_or_empty(file.path()).len(), 3);
}

#[test]
fn invalid_utf8_only_affects_its_own_line() {
    let file = write_vocab_bytes(b"<unk> 1\n<S> 2\n</S> 3\ndog 4\ncaf\xe9 5\nruns 6\n");
    let vocab = Vocabulary::load_or_empty(file.path());
    assert_eq!(vocab.len(), 6);
    assert_eq!(vocab.word_at(3), "dog");
    assert_eq!(vocab.word_at(4), "caf\u{fffd}");
    assert_eq!(vocab.word_at(5), "runs");
}
