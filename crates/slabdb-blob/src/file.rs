//! Backing file management and record-level I/O.
//!
//! The file is created at its full size up front so that every slot exists
//! from the start and a freshly created table reads as all zeros. Record
//! addresses are byte offsets computed as `slot * record_size`; nothing in
//! this layer range-checks slots, the probe engine bounds them.

use slabdb_common::{Result, SlabError};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Permissions for created parent directories (Unix).
#[cfg(unix)]
const DIR_PERM: u32 = 0o750;

/// An open blob backing file.
///
/// Owns the file handle exclusively; record I/O takes `&mut self` so a
/// blob cannot be read while a write is in flight.
#[derive(Debug)]
pub struct BlobFile {
    /// The file handle.
    file: File,
    /// Path to the file.
    path: PathBuf,
    /// Size of one record in bytes.
    record_size: u64,
}

impl BlobFile {
    /// Opens or creates the backing file and guarantees it is exactly
    /// `file_size` bytes long.
    ///
    /// Missing parent directories are created first. A newly created
    /// (zero-length) file is preallocated to the full table size with the
    /// operating-system fallocate primitive so the extents exist on disk.
    /// An existing file of any other length is rejected as
    /// [`SlabError::Corrupted`].
    pub fn open(path: &Path, record_size: u64, file_size: u64) -> Result<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                create_dirs(dir)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        let mut len = file.metadata()?.len();
        if len == 0 {
            preallocate(&file, file_size)?;
            len = file.metadata()?.len();
        }

        if len != file_size {
            return Err(SlabError::Corrupted {
                expected: file_size,
                actual: len,
            });
        }

        Ok(Self {
            file,
            path: path.to_path_buf(),
            record_size,
        })
    }

    /// Reads exactly `buf.len()` bytes at the record offset of `slot`.
    ///
    /// `buf` is either a full record or its leading key field. A read past
    /// end-of-file fails with an I/O error.
    pub fn read_at(&mut self, slot: u64, buf: &mut [u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(slot * self.record_size))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    /// Writes a full record at the record offset of `slot`.
    pub fn write_at(&mut self, slot: u64, buf: &[u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(slot * self.record_size))?;
        self.file.write_all(buf)?;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the backing file, consuming the handle.
    pub fn destroy(self) -> Result<()> {
        let path = self.path.clone();
        drop(self.file);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_dirs(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_PERM)
        .create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_dirs(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Reserves physical extents for `len` bytes starting at offset zero.
#[cfg(target_os = "linux")]
fn preallocate(file: &File, len: u64) -> Result<()> {
    use std::os::unix::io::AsRawFd;

    loop {
        let ret = unsafe { libc::posix_fallocate(file.as_raw_fd(), 0, len as libc::off_t) };
        if ret == 0 {
            return Ok(());
        }
        if ret != libc::EINTR {
            return Err(std::io::Error::from_raw_os_error(ret).into());
        }
    }
}

/// Fallback for platforms without `posix_fallocate`: extend to the target
/// length, leaving allocation to the filesystem.
#[cfg(not(target_os = "linux"))]
fn preallocate(file: &File, len: u64) -> Result<()> {
    file.set_len(len)?;
    Ok(())
}
