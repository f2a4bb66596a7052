//! Chief-complaint text preparation and the topic-labeling seam.

use anyhow::Result;

use edprep_standards::is_stop_word;

/// Assigns a topic to each tokenized document.
///
/// Implementations wrap a trained topic model. The pipeline only consumes
/// the output: one zero-based topic id per document, `None` when the model
/// assigns nothing.
pub trait TopicLabeler: Send + Sync {
    fn label_topics(&self, documents: &[Vec<String>]) -> Result<Vec<Option<usize>>>;
}

/// Lowercase, keep ASCII letters and whitespace, split, drop stop words.
pub fn tokenize_complaint(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphabetic() || ch.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_digits_and_stop_words() {
        assert_eq!(
            tokenize_complaint("Chest pain, s/p fall x2 with SOB"),
            vec!["chest", "pain", "sp", "fall", "x", "sob"]
        );
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize_complaint("").is_empty());
        assert!(tokenize_complaint("the of and").is_empty());
    }
}
