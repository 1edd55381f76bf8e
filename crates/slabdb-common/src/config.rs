//! Configuration structures for SlabDB.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a single blob store.
///
/// All fields are fixed for the lifetime of the backing file: the on-disk
/// format carries no header, so the geometry must be supplied externally
/// every time the file is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Path of the backing file.
    pub path: PathBuf,
    /// Key width in bytes.
    pub key_size: u32,
    /// Value width in bytes.
    pub value_size: u32,
    /// Capacity exponent: 2^capacity slots in total.
    /// Zero selects full-range direct mapping.
    pub capacity: u8,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/blob.slab"),
            key_size: 8,
            value_size: 32,
            capacity: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_config_defaults() {
        let config = BlobConfig::default();
        assert_eq!(config.path, PathBuf::from("./data/blob.slab"));
        assert_eq!(config.key_size, 8);
        assert_eq!(config.value_size, 32);
        assert_eq!(config.capacity, 24);
    }

    #[test]
    fn test_blob_config_custom() {
        let config = BlobConfig {
            path: PathBuf::from("/var/lib/slabdb/index.slab"),
            key_size: 4,
            value_size: 3,
            capacity: 10,
        };

        assert_eq!(config.path, PathBuf::from("/var/lib/slabdb/index.slab"));
        assert_eq!(config.key_size, 4);
        assert_eq!(config.value_size, 3);
        assert_eq!(config.capacity, 10);
    }

    #[test]
    fn test_blob_config_clone() {
        let config1 = BlobConfig::default();
        let config2 = config1.clone();
        assert_eq!(config1.path, config2.path);
        assert_eq!(config1.key_size, config2.key_size);
        assert_eq!(config1.value_size, config2.value_size);
        assert_eq!(config1.capacity, config2.capacity);
    }

    #[test]
    fn test_blob_config_serde_roundtrip() {
        let original = BlobConfig {
            path: PathBuf::from("./test.slab"),
            key_size: 2,
            value_size: 5,
            capacity: 0,
        };
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: BlobConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(original.path, deserialized.path);
        assert_eq!(original.key_size, deserialized.key_size);
        assert_eq!(original.value_size, deserialized.value_size);
        assert_eq!(original.capacity, deserialized.capacity);
    }
}
