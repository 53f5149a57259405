use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path:?} is not a valid {dataset} path: {reason}")]
pub struct GrammarError {
    pub dataset: &'static str,
    pub path: String,
    pub reason: String,
}

impl GrammarError {
    pub fn new(dataset: &'static str, path: &str, reason: impl Into<String>) -> Self {
        Self {
            dataset,
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Invertible mapping between a dataset's sample identifier and the file
/// path (relative to the dataset root, `/`-separated) that stores it.
///
/// `synthesize` never touches the file system; the returned path may or
/// may not exist. `parse` accepts exactly the strings `synthesize` can
/// produce, so `parse(&id.synthesize()) == Ok(id)`.
pub trait PathGrammar: Sized {
    fn synthesize(&self) -> String;

    fn parse(path: &str) -> Result<Self, GrammarError>;
}

/// Finds the variant whose canonical token equals `token`.
pub(crate) fn lookup<T: Copy>(all: &[T], token: &str, as_str: fn(T) -> &'static str) -> Option<T> {
    all.iter().copied().find(|v| as_str(*v) == token)
}

/// Parses a zero-padded decimal field of exactly `width` digits.
pub(crate) fn parse_padded(token: &str, width: usize) -> Option<u32> {
    if token.len() != width || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("07", 2, Some(7))]
    #[case("00042", 5, Some(42))]
    #[case("7", 2, None)]
    #[case("+7", 2, None)]
    #[case("1a", 2, None)]
    #[case("", 0, None)]
    fn test_parse_padded(#[case] token: &str, #[case] width: usize, #[case] expected: Option<u32>) {
        assert_eq!(parse_padded(token, width), expected);
    }

    #[test]
    fn test_lookup_matches_canonical_token() {
        fn name(v: u8) -> &'static str {
            ["zero", "one"][v as usize]
        }
        assert_eq!(lookup(&[0u8, 1], "one", name), Some(1));
        assert_eq!(lookup(&[0u8, 1], "One", name), None);
    }

    #[test]
    fn test_error_message_names_dataset_and_path() {
        let err = GrammarError::new("cmu", "a/b.pgm", "bad subject");
        assert_eq!(
            err.to_string(),
            "\"a/b.pgm\" is not a valid cmu path: bad subject"
        );
    }
}
