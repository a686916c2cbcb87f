//! Content fingerprinting via streamed SHA-256.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use fim_core::constants::FINGERPRINT_CHUNK_SIZE;
use fim_core::errors::FingerprintError;
use fim_core::events::{FileErrorEvent, FileHashedEvent, FimEventHandler};
use rayon::prelude::*;
use sha2::{Digest as _, Sha256};

use crate::baseline::Digest;

/// Outcome of hashing one file, produced by exactly one worker.
#[derive(Debug)]
pub struct FingerprintRecord {
    pub path: PathBuf,
    pub outcome: Result<Digest, FingerprintError>,
}

/// Hash a file's content in fixed-size chunks.
///
/// Memory use does not grow with file size. Metadata (mtime, mode, owner)
/// never contributes to the digest.
pub fn fingerprint(path: &Path) -> Result<Digest, FingerprintError> {
    let mut file = File::open(path).map_err(|source| FingerprintError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; FINGERPRINT_CHUNK_SIZE];
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(FingerprintError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        hasher.update(&buf[..n]);
    }
    Ok(Digest::from_bytes(&hasher.finalize()))
}

/// Hash an in-memory buffer. Same digest as [`fingerprint`] on a file with
/// this content.
#[inline]
pub fn fingerprint_bytes(content: &[u8]) -> Digest {
    Digest::from_bytes(&Sha256::digest(content))
}

/// Hash every path in parallel.
///
/// The returned records are in the same order as `paths`; callers aggregate
/// them on their own thread. `threads == 0` uses the global rayon pool.
pub fn fingerprint_all(
    paths: &[PathBuf],
    threads: usize,
    handler: &dyn FimEventHandler,
) -> Vec<FingerprintRecord> {
    let run = || -> Vec<FingerprintRecord> {
        paths
            .par_iter()
            .map(|path| hash_one(path, handler))
            .collect()
    };

    if threads == 0 {
        return run();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            tracing::warn!(threads, error = %e, "cannot build hashing pool, using global pool");
            run()
        }
    }
}

fn hash_one(path: &Path, handler: &dyn FimEventHandler) -> FingerprintRecord {
    let outcome = fingerprint(path);
    match &outcome {
        Ok(_) => handler.on_file_hashed(&FileHashedEvent {
            path: path.to_path_buf(),
        }),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "fingerprint failed");
            handler.on_file_error(&FileErrorEvent {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    }
    FingerprintRecord {
        path: path.to_path_buf(),
        outcome,
    }
}
