use std::collections::VecDeque;
use std::path::Path;

use crate::error::Result;
use crate::index::Index;
use crate::wordbag::WordBag;

/// Boundary to the network: fetching stays outside the engine. `None`
/// signals a failed download.
pub trait PageFetcher {
    fn fetch(&mut self, url: &str) -> Option<String>;
}

impl<F> PageFetcher for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn fetch(&mut self, url: &str) -> Option<String> {
        self(url)
    }
}

/// Drains a FIFO queue of URLs through a [`PageFetcher`], incorporating each
/// successfully fetched page into an owned [`Index`]. Every added URL is
/// attempted exactly once, with one completion callback per attempt.
pub struct Crawler {
    index: Index,
    pending: VecDeque<String>,
    urls_added: usize,
}

impl Crawler {
    pub fn new() -> Self {
        Crawler {
            index: Index::new(),
            pending: VecDeque::new(),
            urls_added: 0,
        }
    }

    pub fn with_index(index: Index) -> Self {
        Crawler {
            index,
            pending: VecDeque::new(),
            urls_added: 0,
        }
    }

    /// Queues a URL for the next [`crawl`](Self::crawl). Queuing does not
    /// fetch.
    pub fn add_url(&mut self, url: impl Into<String>) {
        self.pending.push_back(url.into());
        self.urls_added += 1;
    }

    /// Total URLs added over the crawler's lifetime.
    pub fn url_count(&self) -> usize {
        self.urls_added
    }

    /// Fetches every queued URL in FIFO order. For each: download the page,
    /// build its word bag, incorporate it, then report `(url, success)`
    /// through the callback. A URL already in the index still reports
    /// success; its duplicate incorporation is simply a no-op. A fatal
    /// incorporation error (a full URL table) still fires the callback,
    /// reporting failure, before the error propagates and aborts the crawl.
    pub fn crawl<F, C>(&mut self, fetcher: &mut F, mut on_complete: C) -> Result<()>
    where
        F: PageFetcher,
        C: FnMut(&str, bool),
    {
        while let Some(url) = self.pending.pop_front() {
            match fetcher.fetch(&url) {
                Some(page) => {
                    let bag = WordBag::new(&page);
                    let incorporated = self.index.incorporate(&url, bag.iter());
                    on_complete(&url, incorporated.is_ok());
                    incorporated?;
                }
                None => {
                    tracing::debug!(url, "fetch failed");
                    on_complete(&url, false);
                }
            }
        }
        Ok(())
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn save<P: AsRef<Path>>(&self, prefix: P) -> Result<()> {
        self.index.save(prefix)
    }

    pub fn load<P: AsRef<Path>>(&mut self, prefix: P) -> Result<()> {
        self.index.load(prefix)
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}
