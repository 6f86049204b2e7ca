use crate::ordered_map::OrderedMap;
use crate::tokenizer::tokenize;

/// Term-frequency table for a single document: each distinct word of the
/// text mapped to its occurrence count. This is what the index consumes.
pub struct WordBag {
    counts: OrderedMap<String, u32>,
}

impl WordBag {
    /// Tokenizes `text` (lowercased by the tokenizer) and tallies each word.
    pub fn new(text: &str) -> Self {
        let mut counts: OrderedMap<String, u32> = OrderedMap::new();
        for word in tokenize(text) {
            match counts.get_mut(&word) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(word, 1);
                }
            }
        }
        WordBag { counts }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// The `(word, count)` pairs in the bag's traversal order.
    pub fn into_counts(self) -> Vec<(String, u32)> {
        self.counts
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_words() {
        let bag = WordBag::new("i like spam and i hate gogiberries and spam");
        assert_eq!(bag.len(), 6);
        let counts = bag.into_counts();
        let get = |w: &str| counts.iter().find(|(word, _)| word == w).map(|(_, c)| *c);
        assert_eq!(get("i"), Some(2));
        assert_eq!(get("spam"), Some(2));
        assert_eq!(get("and"), Some(2));
        assert_eq!(get("gogiberries"), Some(1));
    }

    #[test]
    fn case_folds_before_counting() {
        let bag = WordBag::new("Spam SPAM spam");
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.into_counts(), vec![("spam".to_string(), 3)]);
    }

    #[test]
    fn empty_text_gives_empty_bag() {
        assert!(WordBag::new("").is_empty());
    }
}
