//! On-disk layout: four artifacts under a shared directory prefix.
//!
//! | file | content |
//! |---|---|
//! | `meta.json` | document count, format version, creation timestamp |
//! | `url_to_id.bin` | `(url, id)` records |
//! | `id_to_url.bin` | `(id, url)` records |
//! | `postings.bin` | `(word, postings)` records |
//!
//! The record files are bincode; the metadata is JSON so it stays readable.
//! `meta.json`'s `doc_count` bounds how many records the map artifacts may
//! hold; loading validates the counts instead of trusting end-of-file.

use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::PostingEntry;
use crate::url_table::DocId;

pub const FORMAT_VERSION: u32 = 1;

/// Resolves the artifact paths for one persisted index.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }

    fn url_to_id(&self) -> PathBuf {
        self.root.join("url_to_id.bin")
    }

    fn id_to_url(&self) -> PathBuf {
        self.root.join("id_to_url.bin")
    }

    fn postings(&self) -> PathBuf {
        self.root.join("postings.bin")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub doc_count: u32,
    /// Bucket count of the URL table that produced the ids. Loading rebuilds
    /// the table at this capacity; probe chains only replay correctly when
    /// the capacity matches.
    pub url_capacity: usize,
    pub version: u32,
    pub created_at: String,
}

impl MetaFile {
    pub fn new(doc_count: u32, url_capacity: usize) -> Self {
        let created_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into());
        MetaFile {
            doc_count,
            url_capacity,
            version: FORMAT_VERSION,
            created_at,
        }
    }
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

pub fn save_url_to_id(paths: &IndexPaths, records: &[(String, DocId)]) -> Result<()> {
    write_bin(&paths.url_to_id(), records)
}

pub fn load_url_to_id(paths: &IndexPaths) -> Result<Vec<(String, DocId)>> {
    read_bin(&paths.url_to_id())
}

pub fn save_id_to_url(paths: &IndexPaths, records: &[(DocId, String)]) -> Result<()> {
    write_bin(&paths.id_to_url(), records)
}

pub fn load_id_to_url(paths: &IndexPaths) -> Result<Vec<(DocId, String)>> {
    read_bin(&paths.id_to_url())
}

pub fn save_postings(paths: &IndexPaths, records: &[(String, Vec<PostingEntry>)]) -> Result<()> {
    write_bin(&paths.postings(), records)
}

pub fn load_postings(paths: &IndexPaths) -> Result<Vec<(String, Vec<PostingEntry>)>> {
    read_bin(&paths.postings())
}

fn write_bin<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut f = File::create(path)?;
    let bytes = bincode::serialize(value)?;
    f.write_all(&bytes)?;
    Ok(())
}

fn read_bin<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let mut f = File::open(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let value = bincode::deserialize(&buf)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn meta_round_trips_through_json() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        save_meta(&paths, &MetaFile::new(42, 101)).unwrap();
        let meta = load_meta(&paths).unwrap();
        assert_eq!(meta.doc_count, 42);
        assert_eq!(meta.url_capacity, 101);
        assert_eq!(meta.version, FORMAT_VERSION);
    }

    #[test]
    fn records_round_trip_through_bincode() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        let records = vec![("www.a.com".to_string(), 3u32), ("www.b.com".to_string(), 7u32)];
        save_url_to_id(&paths, &records).unwrap();
        assert_eq!(load_url_to_id(&paths).unwrap(), records);
    }

    #[test]
    fn missing_artifact_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path().join("nope"));
        assert!(matches!(
            load_meta(&paths),
            Err(crate::error::Error::Storage(_))
        ));
    }

    #[test]
    fn truncated_artifact_is_a_codec_error() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        let records = vec![("www.a.com".to_string(), 1u32)];
        save_url_to_id(&paths, &records).unwrap();
        let file = dir.path().join("url_to_id.bin");
        let bytes = std::fs::read(&file).unwrap();
        std::fs::write(&file, &bytes[..bytes.len() / 2]).unwrap();
        assert!(matches!(
            load_url_to_id(&paths),
            Err(crate::error::Error::Codec(_))
        ));
    }
}
