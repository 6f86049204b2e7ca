//! webdex: a minimal full-text search engine.
//!
//! Documents are incorporated as `(word, count)` term frequencies keyed by
//! URL, stored in an inverted index whose URLs are interned to compact ids
//! through a fixed-capacity linear-probe table. The index persists to four
//! on-disk artifacts and answers multi-term queries with threshold-filtered,
//! score-ranked URL lists.
//!
//! ```
//! use webdex::{Index, Searcher, WordBag};
//!
//! let mut index = Index::new();
//! let bag = WordBag::new("I like spam and I hate gogiberries");
//! index.incorporate("www.a.com", bag.iter()).unwrap();
//!
//! let searcher = Searcher::from_index(index);
//! assert_eq!(searcher.search("SPAM"), vec!["www.a.com".to_string()]);
//! ```

pub mod crawler;
pub mod error;
pub mod index;
pub mod ordered_map;
pub mod persist;
pub mod searcher;
pub mod shared;
pub mod tokenizer;
pub mod url_table;
pub mod wordbag;

pub use crawler::{Crawler, PageFetcher};
pub use error::{Error, Result};
pub use index::{Index, PostingEntry, UrlCount};
pub use ordered_map::OrderedMap;
pub use searcher::Searcher;
pub use shared::SharedIndex;
pub use url_table::{DocId, UrlTable};
pub use wordbag::WordBag;
