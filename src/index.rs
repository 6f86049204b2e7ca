use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ordered_map::OrderedMap;
use crate::persist::{self, IndexPaths, MetaFile, FORMAT_VERSION};
use crate::url_table::{DocId, UrlTable};

/// One word's occurrence count in one document, stored under the document's
/// compact id rather than its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingEntry {
    pub doc_id: DocId,
    pub count: u32,
}

/// A lookup result: the posting with its id resolved back to the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCount {
    pub url: String,
    pub count: u32,
}

/// The inverted index: word → postings, plus the URL↔id bijection and the
/// interning table that backs it. Append-only per run: a URL is incorporated
/// at most once, postings are never rewritten.
pub struct Index {
    words: OrderedMap<String, Vec<PostingEntry>>,
    url_to_id: OrderedMap<String, DocId>,
    id_to_url: OrderedMap<DocId, String>,
    urls: UrlTable,
    doc_count: u32,
}

impl Index {
    pub fn new() -> Self {
        Index {
            words: OrderedMap::new(),
            url_to_id: OrderedMap::new(),
            id_to_url: OrderedMap::new(),
            urls: UrlTable::new(),
            doc_count: 0,
        }
    }

    /// An index sized for an expected number of distinct URLs. `capacity`
    /// should be several times the expected document count to keep probe
    /// chains short.
    pub fn with_url_capacity(capacity: usize) -> Self {
        Index {
            words: OrderedMap::new(),
            url_to_id: OrderedMap::new(),
            id_to_url: OrderedMap::new(),
            urls: UrlTable::with_capacity(capacity),
            doc_count: 0,
        }
    }

    /// Number of distinct URLs incorporated.
    pub fn document_count(&self) -> u32 {
        self.doc_count
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Adds one document's term frequencies under `url`. Returns `Ok(false)`
    /// without touching the index when the URL was already incorporated.
    /// Words are lowercased before use as keys. Fails only when the URL
    /// table is full.
    pub fn incorporate<'a, I>(&mut self, url: &str, counts: I) -> Result<bool>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        if self.urls.contains(url) {
            tracing::debug!(url, "duplicate url rejected");
            return Ok(false);
        }

        let id = self.urls.insert(url)?;
        self.url_to_id.insert(url.to_string(), id);
        self.id_to_url.insert(id, url.to_string());
        self.doc_count += 1;

        let mut words = 0usize;
        for (word, count) in counts {
            let word = word.to_lowercase();
            let entry = PostingEntry { doc_id: id, count };
            match self.words.get_mut(word.as_str()) {
                Some(postings) => postings.push(entry),
                None => {
                    self.words.insert(word, vec![entry]);
                }
            }
            words += 1;
        }

        tracing::debug!(url, doc_id = id, words, "incorporated document");
        Ok(true)
    }

    /// Postings for `word` (case-insensitive), in incorporation order.
    /// Unknown words yield an empty vector, not an error.
    pub fn lookup(&self, word: &str) -> Vec<UrlCount> {
        let word = word.to_lowercase();
        let Some(postings) = self.words.get(word.as_str()) else {
            return Vec::new();
        };
        postings
            .iter()
            .filter_map(|entry| {
                self.urls.url_for(entry.doc_id).map(|url| UrlCount {
                    url: url.to_string(),
                    count: entry.count,
                })
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.url_to_id.clear();
        self.id_to_url.clear();
        self.urls.clear();
        self.doc_count = 0;
    }

    /// Serializes the index under `prefix`: metadata (with the document
    /// count that bounds a later load), the two URL/id maps, and the
    /// postings.
    pub fn save<P: AsRef<Path>>(&self, prefix: P) -> Result<()> {
        let paths = IndexPaths::new(prefix);

        let url_to_id: Vec<(String, DocId)> = self
            .url_to_id
            .iter()
            .map(|(url, id)| (url.clone(), *id))
            .collect();
        let id_to_url: Vec<(DocId, String)> = self
            .id_to_url
            .iter()
            .map(|(id, url)| (*id, url.clone()))
            .collect();
        let postings: Vec<(String, Vec<PostingEntry>)> = self
            .words
            .iter()
            .map(|(word, list)| (word.clone(), list.clone()))
            .collect();

        persist::save_meta(
            &paths,
            &MetaFile::new(self.doc_count, self.urls.capacity()),
        )?;
        persist::save_url_to_id(&paths, &url_to_id)?;
        persist::save_id_to_url(&paths, &id_to_url)?;
        persist::save_postings(&paths, &postings)?;

        tracing::info!(
            prefix = %paths.root.display(),
            doc_count = self.doc_count,
            words = postings.len(),
            "index saved"
        );
        Ok(())
    }

    /// Replaces this index with the one persisted under `prefix`, including
    /// its URL-table capacity (ids are slot indices, so duplicate detection
    /// only survives the round trip at the original capacity).
    ///
    /// The current state is cleared first; on any failure (missing,
    /// truncated, or inconsistent artifact) the index stays empty.
    pub fn load<P: AsRef<Path>>(&mut self, prefix: P) -> Result<()> {
        self.clear();
        let loaded = Self::read_from(prefix.as_ref())?;
        *self = loaded;
        tracing::info!(
            prefix = %prefix.as_ref().display(),
            doc_count = self.doc_count,
            "index loaded"
        );
        Ok(())
    }

    fn read_from(prefix: &Path) -> Result<Index> {
        let paths = IndexPaths::new(prefix);

        let meta = persist::load_meta(&paths)?;
        if meta.version != FORMAT_VERSION {
            return Err(Error::Corrupt(format!(
                "unsupported format version {}",
                meta.version
            )));
        }
        if meta.url_capacity == 0 || (meta.doc_count as usize) > meta.url_capacity {
            return Err(Error::Corrupt(format!(
                "url table capacity {} cannot hold {} documents",
                meta.url_capacity, meta.doc_count
            )));
        }
        let url_to_id = persist::load_url_to_id(&paths)?;
        let id_to_url = persist::load_id_to_url(&paths)?;
        let postings = persist::load_postings(&paths)?;

        // The persisted count bounds both map artifacts; a mismatch means a
        // truncated or tampered file.
        let count = meta.doc_count as usize;
        if url_to_id.len() != count {
            return Err(Error::Corrupt(format!(
                "url map holds {} records, metadata says {}",
                url_to_id.len(),
                count
            )));
        }
        if id_to_url.len() != count {
            return Err(Error::Corrupt(format!(
                "id map holds {} records, metadata says {}",
                id_to_url.len(),
                count
            )));
        }

        let mut index = Index::with_url_capacity(meta.url_capacity);
        for (url, id) in &url_to_id {
            index.urls.restore(*id, url)?;
            index.url_to_id.insert(url.clone(), *id);
        }
        for (id, url) in id_to_url {
            match index.url_to_id.get(url.as_str()) {
                Some(mapped) if *mapped == id => {}
                _ => {
                    return Err(Error::Corrupt(format!(
                        "url/id maps disagree on {url}"
                    )))
                }
            }
            index.id_to_url.insert(id, url);
        }
        for (word, list) in postings {
            for entry in &list {
                if index.id_to_url.get(&entry.doc_id).is_none() {
                    return Err(Error::Corrupt(format!(
                        "posting for {word:?} references unknown document id {}",
                        entry.doc_id
                    )));
                }
            }
            index.words.insert(word, list);
        }
        index.doc_count = meta.doc_count;
        Ok(index)
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}
