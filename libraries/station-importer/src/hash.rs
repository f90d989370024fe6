//! Content hashing for duplicate detection

use crate::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BLOCK_SIZE: usize = 64 * 1024;

/// Computes a stable digest of a file's bytes
///
/// Two files with the same digest are the same recording as far as the
/// catalog is concerned.
pub trait ContentHasher: Send + Sync {
    fn hash_file(&self, path: &Path) -> Result<String>;
}

/// SHA-256 over the whole file, lowercase hex
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn hash_file(&self, path: &Path) -> Result<String> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; BLOCK_SIZE];

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_known_digests() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty.mp3");
        let abc = temp.path().join("abc.mp3");
        fs::write(&empty, b"").unwrap();
        fs::write(&abc, b"abc").unwrap();

        assert_eq!(
            Sha256Hasher.hash_file(&empty).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            Sha256Hasher.hash_file(&abc).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_multi_block_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("long.flac");
        let data: Vec<u8> = (0..BLOCK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &data).unwrap();

        assert_eq!(
            Sha256Hasher.hash_file(&path).unwrap(),
            hex::encode(Sha256::digest(&data))
        );
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(Sha256Hasher.hash_file(&temp.path().join("nope.mp3")).is_err());
    }
}
