//! Label vocabulary loading.

use crate::error::{Error, Result};
use std::path::Path;

/// Ordered label list that defines the index-to-label mapping of every score vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from labels in index order.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if labels.iter().all(|l| l.trim().is_empty()) {
            return Err(Error::EmptyVocabulary);
        }
        Ok(Self { labels })
    }

    /// Parse a label list, one label per line.
    ///
    /// The index of a label is its line number. Lines are kept as written
    /// apart from a trailing `\r`, and blank lines still occupy an index so
    /// that positions stay aligned with the model output.
    pub fn parse(contents: &str) -> Result<Self> {
        Self::new(
            contents
                .lines()
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect(),
        )
    }

    /// Read a label list from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::LabelsFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    /// Number of labels (N).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed vocabulary.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label at `index`, if any.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of the first occurrence of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Fail with a shape error unless `scores` has one entry per label.
    pub fn check_len(&self, scores: &[f32]) -> Result<()> {
        if scores.len() == self.labels.len() {
            Ok(())
        } else {
            Err(Error::VectorLength {
                expected: self.labels.len(),
                actual: scores.len(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_keeps_line_order() {
        let vocab = Vocabulary::parse("cocacola\nperrier\nother\n").unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.label(0), Some("cocacola"));
        assert_eq!(vocab.index_of("other"), Some(2));
    }

    #[test]
    fn test_parse_strips_carriage_returns() {
        let vocab = Vocabulary::parse("cocacola\r\nperrier\r\nother\r").unwrap();
        assert_eq!(vocab.labels(), ["cocacola", "perrier", "other"]);
    }

    #[test]
    fn test_parse_keeps_surrounding_spaces() {
        let vocab = Vocabulary::parse("cocacola\n perrier \nother").unwrap();
        assert_eq!(vocab.label(1), Some(" perrier "));
        assert_eq!(vocab.index_of("perrier"), None);
    }

    #[test]
    fn test_blank_line_keeps_its_index() {
        let vocab = Vocabulary::parse("cocacola\n\nother\n").unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.label(1), Some(""));
        assert_eq!(vocab.index_of("other"), Some(2));
    }

    #[test]
    fn test_empty_vocabulary_is_rejected() {
        assert!(matches!(Vocabulary::parse(""), Err(Error::EmptyVocabulary)));
        assert!(matches!(
            Vocabulary::parse("\n  \n"),
            Err(Error::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_check_len() {
        let vocab = Vocabulary::parse("a\nb").unwrap();
        assert!(vocab.check_len(&[0.1, 0.2]).is_ok());
        assert!(matches!(
            vocab.check_len(&[0.1]),
            Err(Error::VectorLength {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cocacola").unwrap();
        writeln!(file, "perrier").unwrap();

        let vocab = Vocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let result = Vocabulary::from_file(Path::new("/nonexistent/labels.txt"));
        assert!(matches!(result, Err(Error::LabelsFileNotFound { .. })));
    }
}
