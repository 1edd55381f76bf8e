//! The blob engine: insert/lookup probe loops and lifecycle.

use crate::file::BlobFile;
use bytes::Bytes;
use slabdb_common::{BlobConfig, Geometry, Mode, Result, SlabError};

/// A direct-addressed key→value store backed by a single pre-allocated file.
///
/// The key, read as a big-endian unsigned integer, selects the slot. In
/// direct mode (`capacity == 0`) the slot index equals the key and the
/// record holds only the value. In probed mode (`capacity > 0`) the slot
/// index is the high `capacity` bits of the key, each record carries the
/// key in its leading bytes, and colliding keys probe linearly toward
/// higher slots, at most `capacity + 1` slots per operation.
///
/// An all-zero key field marks an empty slot, which is the state of every
/// slot in a freshly created file. Key `0` is therefore reserved; callers
/// must not store it.
///
/// A `Blob` owns its file handle exclusively and performs no internal
/// locking. Mutating operations take `&mut self`; share one behind an
/// external lock if cross-thread access is needed.
pub struct Blob {
    config: BlobConfig,
    geometry: Geometry,
    file: Option<BlobFile>,
}

impl Blob {
    /// Creates a blob handle from configuration without touching the disk.
    ///
    /// Fails if the configuration derives no valid geometry.
    pub fn new(config: BlobConfig) -> Result<Self> {
        let geometry = Geometry::for_config(&config)?;
        Ok(Self {
            config,
            geometry,
            file: None,
        })
    }

    /// Opens or creates the backing file and verifies its size.
    ///
    /// On first creation the file is preallocated to the full table size.
    /// Calling `init` on an already initialized blob fails with
    /// [`SlabError::AlreadyInitialized`].
    pub fn init(&mut self) -> Result<()> {
        if self.file.is_some() {
            return Err(SlabError::AlreadyInitialized);
        }
        self.file = Some(BlobFile::open(
            &self.config.path,
            self.geometry.record_size(),
            self.geometry.file_size(),
        )?);
        Ok(())
    }

    /// Convenience constructor: [`new`](Self::new) followed by
    /// [`init`](Self::init).
    pub fn open(config: BlobConfig) -> Result<Self> {
        let mut blob = Self::new(config)?;
        blob.init()?;
        Ok(blob)
    }

    /// Stores `value` under `key`. Returns the slot written and the number
    /// of probe iterations.
    ///
    /// The value may be shorter than the configured width; it is
    /// right-aligned in the value field and zero-padded on the left. In
    /// direct mode the write is unconditional and reports zero iterations.
    /// In probed mode the probe stops at the first slot holding the same
    /// key or no key at all; if `capacity + 1` slots are occupied by other
    /// keys the insert fails with [`SlabError::RecordNotFound`] carrying
    /// the attempted slot and probe depth.
    pub fn set(&mut self, key: u128, value: &[u8]) -> Result<(u64, u8)> {
        let geometry = self.geometry;

        if value.len() as u64 > geometry.value_size() as u64 {
            return Err(SlabError::RecordExceedsSize {
                len: value.len(),
                max: geometry.value_size(),
            });
        }
        geometry.check_key(key)?;

        let record_size = geometry.record_size() as usize;
        let mut record = vec![0u8; record_size];
        record[record_size - value.len()..].copy_from_slice(value);

        let mut slot = geometry.slot_of(key);
        let file = self.file_mut()?;

        if geometry.mode() == Mode::Direct {
            file.write_at(slot, &record)?;
            return Ok((slot, 0));
        }

        let key_size = geometry.key_size() as usize;
        geometry.encode_key(key, &mut record[..key_size]);

        let mut stored = vec![0u8; key_size];
        let mut iters: u8 = 0;
        loop {
            iters += 1;
            file.read_at(slot, &mut stored)?;
            let stored_key = geometry.decode_key(&stored);
            if stored_key == key || stored_key == 0 {
                file.write_at(slot, &record)?;
                return Ok((slot, iters));
            }
            if iters > geometry.capacity() {
                return Err(SlabError::RecordNotFound { slot, iters });
            }
            slot += 1;
        }
    }

    /// Looks up `key`. Returns the value bytes, the slot they were found
    /// in, and the number of probe iterations.
    ///
    /// Direct mode reads the addressed slot unconditionally: every slot is
    /// considered to hold its implicit value, so a never-written key yields
    /// zeros. Probed mode compares the stored key at each slot and fails
    /// with [`SlabError::RecordNotFound`] once `capacity + 1` slots have
    /// been examined. An empty slot does not end the probe; the full
    /// window is always walked.
    pub fn get(&mut self, key: u128) -> Result<(Bytes, u64, u8)> {
        let geometry = self.geometry;
        geometry.check_key(key)?;

        let record_size = geometry.record_size() as usize;
        let key_size = geometry.key_size() as usize;
        let mut record = vec![0u8; record_size];

        let mut slot = geometry.slot_of(key);
        let mut iters: u8 = 0;
        let file = self.file_mut()?;
        loop {
            iters += 1;
            file.read_at(slot, &mut record)?;

            if geometry.mode() == Mode::Direct {
                return Ok((Bytes::from(record), slot, iters));
            }

            if geometry.decode_key(&record[..key_size]) == key {
                return Ok((Bytes::from(record).slice(key_size..), slot, iters));
            }
            if iters > geometry.capacity() {
                return Err(SlabError::RecordNotFound { slot, iters });
            }
            slot += 1;
        }
    }

    /// Projects a key onto its initial slot index.
    pub fn slot_of(&self, key: u128) -> u64 {
        self.geometry.slot_of(key)
    }

    /// Total number of slots in the blob.
    pub fn record_count(&self) -> u64 {
        self.geometry.record_count()
    }

    /// Total bytes allocated for the blob on disk.
    pub fn file_size(&self) -> u64 {
        self.geometry.file_size()
    }

    /// The derived layout of this blob.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The configuration this blob was created with.
    pub fn config(&self) -> &BlobConfig {
        &self.config
    }

    /// True once [`init`](Self::init) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.file.is_some()
    }

    /// Releases the file handle. Pending writes are left to the operating
    /// system's ordinary write-back.
    pub fn close(&mut self) -> Result<()> {
        self.file = None;
        Ok(())
    }

    /// Removes the backing file.
    pub fn destroy(&mut self) -> Result<()> {
        self.file = None;
        std::fs::remove_file(&self.config.path)?;
        Ok(())
    }

    fn file_mut(&mut self) -> Result<&mut BlobFile> {
        self.file
            .as_mut()
            .ok_or_else(|| SlabError::Internal("blob is not initialized".to_string()))
    }
}
