//! Blob storage engine for SlabDB.
//!
//! A blob is a pre-allocated array of equal-sized records on disk, addressed
//! directly by the key interpreted as a big-endian unsigned integer. There is
//! no index and no file header; the file is the hash table. The shrunken
//! (probed) geometry keeps a key prefix inside each record and resolves
//! collisions by bounded linear probing.
//!
//! This crate provides:
//! - Backing file management with full-size preallocation
//! - Record-level positional I/O
//! - The insert/lookup probe engine and blob lifecycle

mod blob;
mod file;

pub use blob::Blob;
pub use file::BlobFile;
