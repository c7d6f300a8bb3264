//! Maps a source file into memory once per job. The byte-level parsers then address it
//! through a borrowed `&[u8]` slice ([`sonar_core::byte_reader::ByteReader`] is deliberately
//! generic over the slice's origin so it never needs to know this was a memory map).
use memmap2::{Mmap, MmapOptions};
use sonar_core::errors::SonarError;
use std::fs::File;
use std::path::Path;

enum Backing {
    Mapped(Mmap),
    // `Mmap::map` rejects a zero-length file; an empty beam file (spec.md §6.2: "Missing
    // beams are created as empty files") is represented directly instead.
    Empty,
}

/// An open, memory-mapped source file. The underlying [`File`] handle is kept alive for as
/// long as the mapping is, and released when this value is dropped (spec.md §5: "the reader
/// holds exactly one open file handle, scoped to the job").
pub struct MappedFile {
    backing: Backing,
    _file: File,
}

impl MappedFile {
    /// Opens and maps `path`. A missing file surfaces as [`SonarError::MissingInput`] rather
    /// than the raw `io::Error`, matching spec.md §7's error taxonomy.
    pub fn open(path: &Path) -> Result<Self, SonarError> {
        let file = File::open(path).map_err(|_| SonarError::MissingInput {
            msg: path.display().to_string(),
        })?;
        let metadata = file.metadata()?;
        let backing = if metadata.len() == 0 {
            Backing::Empty
        } else {
            // SAFETY: the mapped file is treated read-only for the lifetime of the job; no
            // other process is expected to truncate it concurrently (spec.md §5's single-job,
            // blocking resource model assumes exclusive read access).
            Backing::Mapped(unsafe { MmapOptions::new().map(&file)? })
        };
        Ok(MappedFile {
            backing,
            _file: file,
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(m) => m,
            Backing::Empty => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}
