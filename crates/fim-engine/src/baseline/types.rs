//! Baseline data types: Digest, Baseline.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use fim_core::constants::DIGEST_HEX_LEN;
use serde::Serialize;

/// Lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Accepts exactly 64 lowercase hex characters.
    pub fn from_hex(s: &str) -> Option<Self> {
        let valid = s.len() == DIGEST_HEX_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        valid.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from absolute file path to content digest.
///
/// Keys are UTF-8 path strings so the persisted document round-trips
/// exactly; iteration is in key order. An empty baseline is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    entries: BTreeMap<String, Digest>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `digest` for `path`, replacing any previous digest.
    ///
    /// Returns `false` (and records nothing) when the path is not valid
    /// UTF-8 and therefore cannot be persisted.
    pub fn insert(&mut self, path: &Path, digest: Digest) -> bool {
        match path.to_str() {
            Some(key) => {
                self.entries.insert(key.to_string(), digest);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, path: &Path) -> Option<&Digest> {
        self.entries.get(path.to_str()?)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Digest)> {
        self.entries.iter().map(|(k, v)| (Path::new(k.as_str()), v))
    }

    pub(crate) fn entries(&self) -> &BTreeMap<String, Digest> {
        &self.entries
    }

    pub(crate) fn from_entries(entries: BTreeMap<String, Digest>) -> Self {
        Self { entries }
    }
}
