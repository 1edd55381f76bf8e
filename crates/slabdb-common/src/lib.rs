//! SlabDB common types, errors, and record geometry.
//!
//! This crate provides shared definitions used across all SlabDB components.

pub mod config;
pub mod error;
pub mod geometry;

pub use config::BlobConfig;
pub use error::{Result, SlabError};
pub use geometry::{Geometry, Mode, MAX_CAPACITY, MAX_DIRECT_KEY_SIZE, MAX_KEY_SIZE};
