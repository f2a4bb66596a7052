//! Ordered code-range lookup for alphanumeric diagnosis codes.
//!
//! A range expression is either `"A-B"` or a single code `"A"`. Comparison
//! is lexicographic on the decimal-padded form: a code and a range start get
//! `.0` appended and a range end gets `.9` appended when they carry no
//! decimal point, so `"410"` falls inside `"390-459"` as
//! `"390.0" <= "410.0" <= "459.9"`. Codes are zero-padded consistently in
//! the source data, which is what makes string comparison sound here.

use edprep_model::{EdprepError, Result};
use edprep_standards::BlockDefinition;

/// Label returned when no range matches.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

fn pad(code: &str, suffix: &str) -> String {
    if code.contains('.') {
        code.to_string()
    } else {
        format!("{code}{suffix}")
    }
}

fn is_code(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '.')
}

/// One parsed range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRange {
    start: String,
    end: String,
    padded_start: String,
    padded_end: String,
}

impl CodeRange {
    /// Parse `"A-B"` or `"A"`. Anything else is an
    /// [`EdprepError::InvalidRange`].
    pub fn parse(expression: &str) -> Result<Self> {
        let invalid = || EdprepError::InvalidRange {
            expression: expression.to_string(),
        };
        let trimmed = expression.trim();
        let (start, end) = match trimmed.split_once('-') {
            Some((start, end)) => (start.trim(), end.trim()),
            None => (trimmed, trimmed),
        };
        if !is_code(start) || !is_code(end) {
            return Err(invalid());
        }
        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            padded_start: pad(start, ".0"),
            padded_end: pad(end, ".9"),
        })
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Single-code ranges match by exact equality, without padding.
    pub fn contains(&self, code: &str) -> bool {
        if self.is_single() {
            return code == self.start;
        }
        let padded = pad(code, ".0");
        self.padded_start.as_str() <= padded.as_str() && padded.as_str() <= self.padded_end.as_str()
    }
}

/// Ordered `(range, label)` entries. Ranges may overlap; the first declared
/// match wins.
#[derive(Debug, Clone, Default)]
pub struct RangeMap {
    entries: Vec<(CodeRange, String)>,
}

impl RangeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every range of a labelled group, in order.
    pub fn insert<S: AsRef<str>>(&mut self, label: &str, expressions: &[S]) -> Result<()> {
        for expression in expressions {
            let range = CodeRange::parse(expression.as_ref())?;
            self.entries.push((range, label.to_string()));
        }
        Ok(())
    }

    pub fn from_blocks(blocks: &[BlockDefinition]) -> Result<Self> {
        let mut map = Self::new();
        for block in blocks {
            map.insert(&block.name, &block.ranges)?;
        }
        Ok(map)
    }

    /// First label whose range contains `code`, else [`UNKNOWN_CATEGORY`].
    pub fn lookup(&self, code: &str) -> &str {
        let code = code.trim();
        self.entries
            .iter()
            .find(|(range, _)| range.contains(code))
            .map_or(UNKNOWN_CATEGORY, |(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edprep_standards::default_icd9_blocks;
    use proptest::prelude::*;

    fn chapters() -> RangeMap {
        RangeMap::from_blocks(&default_icd9_blocks()).unwrap()
    }

    #[test]
    fn icd9_chapters_cover_numeric_and_supplementary_codes() {
        let map = chapters();
        assert_eq!(map.lookup("410"), "Diseases Of The Circulatory System");
        assert_eq!(map.lookup("001"), "Infectious And Parasitic Diseases");
        assert_eq!(map.lookup("139"), "Infectious And Parasitic Diseases");
        assert_eq!(map.lookup("999"), "Injury And Poisoning");
        assert!(map.lookup("V58").starts_with("Supplementary Classification Of Factors"));
        assert!(map.lookup("E88").starts_with("Supplementary Classification Of External"));
    }

    #[test]
    fn unmatched_code_is_unknown() {
        let map = chapters();
        assert_eq!(map.lookup("XYZ"), UNKNOWN_CATEGORY);
        assert_eq!(RangeMap::new().lookup("410"), UNKNOWN_CATEGORY);
    }

    #[test]
    fn decimal_codes_compare_within_bounds() {
        let mut map = RangeMap::new();
        map.insert("Hypertension", &["401-405"]).unwrap();
        assert_eq!(map.lookup("401.9"), "Hypertension");
        assert_eq!(map.lookup("405.9"), "Hypertension");
        assert_eq!(map.lookup("406"), UNKNOWN_CATEGORY);
    }

    #[test]
    fn single_code_requires_exact_match() {
        let mut map = RangeMap::new();
        map.insert("Single", &["V30"]).unwrap();
        assert_eq!(map.lookup("V30"), "Single");
        assert_eq!(map.lookup("V30.0"), UNKNOWN_CATEGORY);
        assert_eq!(map.lookup("V31"), UNKNOWN_CATEGORY);
    }

    #[test]
    fn first_declared_overlap_wins() {
        let mut map = RangeMap::new();
        map.insert("Broad", &["390-459"]).unwrap();
        map.insert("Narrow", &["410-414"]).unwrap();
        assert_eq!(map.lookup("410"), "Broad");

        let mut reversed = RangeMap::new();
        reversed.insert("Narrow", &["410-414"]).unwrap();
        reversed.insert("Broad", &["390-459"]).unwrap();
        assert_eq!(reversed.lookup("410"), "Narrow");
        assert_eq!(reversed.lookup("400"), "Broad");
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        for expression in ["", "-", "390-", "-459", "390-459-500", "39 0", "A*B"] {
            let err = CodeRange::parse(expression).unwrap_err();
            assert!(
                matches!(err, EdprepError::InvalidRange { .. }),
                "{expression:?} should be rejected"
            );
        }
        let mut map = RangeMap::new();
        assert!(map.insert("Bad", &["001-139", "oops!"]).is_err());
    }

    proptest! {
        #[test]
        fn earlier_range_shadows_later_overlap(
            a in 0u32..500,
            b in 0u32..500,
            c in 0u32..500,
            d in 0u32..500,
            probe in 0u32..1000,
        ) {
            let (first_lo, first_hi) = (a.min(b), a.max(b) + 1);
            let (second_lo, second_hi) = (c.min(d), c.max(d) + 1);
            let mut map = RangeMap::new();
            map.insert("first", &[format!("{first_lo:03}-{first_hi:03}")]).unwrap();
            map.insert("second", &[format!("{second_lo:03}-{second_hi:03}")]).unwrap();

            let code = format!("{probe:03}");
            let expected = if (first_lo..=first_hi).contains(&probe) {
                "first"
            } else if (second_lo..=second_hi).contains(&probe) {
                "second"
            } else {
                UNKNOWN_CATEGORY
            };
            prop_assert_eq!(map.lookup(&code), expected);
        }
    }
}
