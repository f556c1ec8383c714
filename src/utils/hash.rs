use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read size for streaming digests.
const CHUNK_SIZE: usize = 1 << 20;

/// Lowercase hex SHA-256 of `data`.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Lowercase hex SHA-256 of a file's contents, read in 1 MiB chunks.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_hash_bytes_known_value() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hash_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_file_matches_bytes() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("map.SC2Map");
        let content = b"Test content for hashing";
        std::fs::write(&file_path, content)?;

        let hash = hash_file(&file_path)?;
        assert_eq!(hash, hash_bytes(content));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        Ok(())
    }

    #[test]
    fn test_hash_file_spanning_chunks() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("big.SC2Mod");
        let content: Vec<u8> = (0..(CHUNK_SIZE * 2 + 17)).map(|i| (i % 251) as u8).collect();
        std::fs::write(&file_path, &content)?;

        assert_eq!(hash_file(&file_path)?, hash_bytes(&content));

        Ok(())
    }

    #[test]
    fn test_hash_missing_file_errors() {
        let dir = tempdir().unwrap();
        let err = hash_file(&dir.path().join("missing.SC2Map")).unwrap_err();
        assert!(err.to_string().contains("missing.SC2Map"));
    }
}
