use camino::Utf8Path;
use depwitness_domain::ArtifactDigester;
use depwitness_types::ContentDigest;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;

/// Read size per chunk; artifacts are never loaded whole.
const CHUNK_SIZE: usize = 64 * 1024;

/// SHA-256 of a file's content, as lowercase hex.
///
/// Only bytes enter the digest: timestamps, permissions and the file name do not.
pub fn sha256_file(path: &Utf8Path) -> std::io::Result<ContentDigest> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(ContentDigest::new(hex::encode(hasher.finalize())))
}

/// The filesystem-backed digest engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDigester;

impl ArtifactDigester for FileDigester {
    fn digest(&self, path: &Utf8Path) -> std::io::Result<ContentDigest> {
        tracing::trace!(%path, "hashing artifact");
        sha256_file(path)
    }
}
