//! Random access to the files inside a unicode-table-data archive.
//!
//! The archive is a ZIP file whose single top-level directory (the data
//! root) holds:
//!
//! ```text
//! <root>/data/blocks.txt           block ranges
//! <root>/loc/<lang>/symbols/**     per-code-point names
//! <root>/loc/<lang>/blocks.txt     canonical -> localized block names
//! ```

pub mod zip;

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::table::codec::compression;
use crate::table::types::error::{Result, UnicodeTableError};
use self::zip::EntryMeta;

/// Path of the range file relative to the data root.
pub const RANGES_FILE: &str = "data/blocks.txt";

/// Where the archive bytes come from.
#[derive(Debug, Clone)]
pub enum ArchiveSource {
    /// A ZIP file on disk.
    Path(PathBuf),
    /// A ZIP file already in memory, e.g. freshly downloaded.
    Bytes(Vec<u8>),
}

impl From<PathBuf> for ArchiveSource {
    fn from(path: PathBuf) -> Self {
        ArchiveSource::Path(path)
    }
}

impl From<&Path> for ArchiveSource {
    fn from(path: &Path) -> Self {
        ArchiveSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ArchiveSource {
    fn from(bytes: Vec<u8>) -> Self {
        ArchiveSource::Bytes(bytes)
    }
}

trait ReadSeek: Read + Seek + Send {}
impl<T: Read + Seek + Send> ReadSeek for T {}

/// An opened archive: its entry listing plus a reader to fetch payloads.
pub struct Archive {
    reader: Box<dyn ReadSeek>,
    entries: Vec<EntryMeta>,
    root: String,
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("root", &self.root)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl Archive {
    /// Opens an archive and reads its central directory.
    ///
    /// # Errors
    /// - `ArchiveNotFound` if a path source does not exist
    /// - `ArchiveUnreadable` if the file cannot be read
    /// - `ArchiveMalformed` if it is not a ZIP file or lacks `data/blocks.txt`
    pub fn open(source: impl Into<ArchiveSource>) -> Result<Self> {
        let mut reader: Box<dyn ReadSeek> = match source.into() {
            ArchiveSource::Path(path) => {
                info!("Opening archive: {}", path.display());
                let file = File::open(&path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => UnicodeTableError::ArchiveNotFound(path.clone()),
                    _ => UnicodeTableError::ArchiveUnreadable(e),
                })?;
                Box::new(BufReader::new(file))
            }
            ArchiveSource::Bytes(bytes) => {
                info!("Opening in-memory archive ({} bytes)", bytes.len());
                Box::new(Cursor::new(bytes))
            }
        };

        let eocd = zip::find_end_of_central_directory(&mut reader)?;
        let entries = zip::parse_central_directory(&mut reader, &eocd)?;
        let root = find_data_root(&entries)?;
        info!("Archive opened: {} entries, data root '{}'", entries.len(), root);

        Ok(Self {
            reader,
            entries,
            root,
        })
    }

    /// The data root prefix, including its trailing slash (empty if files sit at top level).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// All entry names in central directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Full entry name for a path relative to the data root.
    pub fn path_in_root(&self, relative: &str) -> String {
        format!("{}{}", self.root, relative)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Files (not directories) under a directory prefix, in central directory order.
    pub fn files_under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |e| !e.is_dir() && e.name.starts_with(prefix))
            .map(|e| e.name.as_str())
    }

    /// Reads and decompresses one entry.
    ///
    /// # Errors
    /// Returns `ArchiveMalformed` if no such entry exists or its payload is corrupt.
    pub fn read(&mut self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .find(name)
            .cloned()
            .ok_or_else(|| UnicodeTableError::ArchiveMalformed(format!("Missing file: {}", name)))?;
        debug!(
            "Reading {} ({} -> {} bytes)",
            entry.name, entry.compressed_size, entry.uncompressed_size
        );
        let method = entry.compression()?;
        let payload = zip::read_local_payload(&mut self.reader, &entry)?;
        compression::decompress_entry(
            &entry.name,
            &payload,
            method,
            u64::from(entry.uncompressed_size),
            entry.crc32,
        )
    }

    /// Reads an entry as UTF-8 text. A byte order mark is dropped and invalid
    /// sequences become U+FFFD.
    pub fn read_text(&mut self, name: &str) -> Result<String> {
        let bytes = self.read(name)?;
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
        if had_errors {
            debug!("{} contains invalid UTF-8, replaced", name);
        }
        Ok(text.into_owned())
    }

    fn find(&self, name: &str) -> Option<&EntryMeta> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// The data root is whatever precedes `data/blocks.txt`, provided it is at
/// most one directory deep.
fn find_data_root(entries: &[EntryMeta]) -> Result<String> {
    entries
        .iter()
        .filter_map(|e| e.name.strip_suffix(RANGES_FILE))
        .find(|prefix| {
            prefix.is_empty()
                || (prefix.ends_with('/') && !prefix[..prefix.len() - 1].contains('/'))
        })
        .map(str::to_string)
        .ok_or_else(|| {
            UnicodeTableError::ArchiveMalformed(format!("Missing file: <root>/{}", RANGES_FILE))
        })
}
