use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
}

/// Tokenize text into lowercase words using NFKC normalization.
///
/// The same tokenizer serves documents and queries, so the index's
/// case-insensitive contract holds on both sides of a lookup.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized)
        .map(|mat| mat.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_punctuation() {
        let toks = tokenize("I like spam, Hate gogiberries!");
        assert_eq!(toks, vec!["i", "like", "spam", "hate", "gogiberries"]);
    }

    #[test]
    fn normalizes_unicode() {
        let toks = tokenize("The café menu");
        assert!(toks.contains(&"café".to_string()) || toks.contains(&"cafe".to_string()));
    }

    #[test]
    fn empty_and_symbol_only_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!!! ... 123").is_empty());
    }
}
