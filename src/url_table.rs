use crate::error::{Error, Result};

/// Document ids are the resolved bucket index a URL landed in, so every
/// interned URL gets a unique id even when hashes collide.
pub type DocId = u32;

/// Default bucket count: prime, roughly 10x the expected distinct-URL count
/// so linear probe chains stay short.
pub const DEFAULT_CAPACITY: usize = 10_007;

/// Fixed-capacity open-addressed table interning URLs to compact ids.
///
/// The string hash only picks the first probe bucket; collisions scan
/// forward (wrapping) to the next free slot. The id handed back is the slot
/// the URL settled in, so two URLs sharing a hash still get distinct ids.
pub struct UrlTable {
    buckets: Vec<Option<String>>,
    len: usize,
}

impl UrlTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "url table capacity must be non-zero");
        UrlTable {
            buckets: vec![None; capacity],
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Deterministic polynomial hash of the URL, reduced into the bucket
    /// range. Collisions are expected and handled by probing.
    pub fn hash(&self, url: &str) -> usize {
        let mut total: u64 = 0;
        for (i, byte) in url.bytes().enumerate() {
            total = total.wrapping_add((i as u64 + 1).wrapping_mul(u64::from(byte)));
        }
        (total % self.buckets.len() as u64) as usize
    }

    /// Interns `url`, returning its assigned id. Probes at most `capacity`
    /// buckets; a full table is a hard error, never a silent drop.
    pub fn insert(&mut self, url: &str) -> Result<DocId> {
        let capacity = self.buckets.len();
        let mut bucket = self.hash(url);
        for _ in 0..capacity {
            if self.buckets[bucket].is_none() {
                self.buckets[bucket] = Some(url.to_string());
                self.len += 1;
                return Ok(bucket as DocId);
            }
            bucket = (bucket + 1) % capacity;
        }
        Err(Error::CapacityExceeded { capacity })
    }

    /// Places `url` at an explicit slot, used when rebuilding the table from
    /// persisted `(id, url)` pairs. Replaying every pair of a previously
    /// valid table reproduces its probe chains exactly.
    pub fn restore(&mut self, id: DocId, url: &str) -> Result<()> {
        let slot = id as usize;
        if slot >= self.buckets.len() {
            return Err(Error::CapacityExceeded {
                capacity: self.buckets.len(),
            });
        }
        if self.buckets[slot].is_some() {
            return Err(Error::Corrupt(format!("duplicate document id {id}")));
        }
        self.buckets[slot] = Some(url.to_string());
        self.len += 1;
        Ok(())
    }

    /// Reverse lookup: the URL interned under `id`, if any.
    pub fn url_for(&self, id: DocId) -> Option<&str> {
        self.buckets.get(id as usize)?.as_deref()
    }

    /// Forward lookup by probing from the URL's hash. Stops at the first
    /// empty slot, so it only finds URLs actually interned here.
    pub fn id_for(&self, url: &str) -> Option<DocId> {
        let capacity = self.buckets.len();
        let mut bucket = self.hash(url);
        for _ in 0..capacity {
            match &self.buckets[bucket] {
                None => return None,
                Some(stored) if stored == url => return Some(bucket as DocId),
                Some(_) => bucket = (bucket + 1) % capacity,
            }
        }
        None
    }

    pub fn contains(&self, url: &str) -> bool {
        self.id_for(url).is_some()
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.len = 0;
    }
}

impl Default for UrlTable {
    fn default() -> Self {
        Self::new()
    }
}
