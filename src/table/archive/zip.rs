//! ZIP container structures: end of central directory, central directory
//! entries and local file headers.
//!
//! # Layout
//! ```text
//! ┌──────────────────────────┐
//! │ Local header + payload   │ ← read_local_payload()
//! │ ...                      │
//! ├──────────────────────────┤
//! │ Central directory        │ ← parse_central_directory()
//! ├──────────────────────────┤
//! │ End of central directory │ ← find_end_of_central_directory()
//! └──────────────────────────┘
//! ```
//!
//! All integers are little-endian.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};

use crate::table::codec::compression::CompressionMethod;
use crate::table::types::error::{Result, UnicodeTableError};

const EOCD_SIGNATURE: u32 = 0x0605_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;

const EOCD_LEN: u64 = 22;
const MAX_COMMENT_LEN: u64 = u16::MAX as u64;
const LOCAL_HEADER_LEN: u64 = 30;

const FLAG_ENCRYPTED: u16 = 0x0001;

/// Location of the central directory, from the end of central directory record.
#[derive(Debug, Clone, Copy)]
pub struct EndOfCentralDirectory {
    pub num_entries: u16,
    pub directory_size: u32,
    pub directory_offset: u32,
}

/// One file or directory listed in the central directory.
#[derive(Debug, Clone)]
pub struct EntryMeta {
    pub name: String,
    pub method: u16,
    pub flags: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub local_header_offset: u32,
}

impl EntryMeta {
    /// Directory entries carry a trailing slash and no data.
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }

    pub fn compression(&self) -> Result<CompressionMethod> {
        CompressionMethod::try_from(self.method)
    }
}

fn malformed(msg: impl Into<String>) -> UnicodeTableError {
    UnicodeTableError::ArchiveMalformed(msg.into())
}

/// Scans backwards from the end of the stream for the end of central directory record.
///
/// The record may be followed by a comment of up to 65535 bytes, so the last
/// `22 + 65535` bytes are searched. A signature only counts if the comment
/// length recorded after it reaches exactly to the end of the stream, so a
/// comment that itself contains the signature bytes is skipped over.
pub fn find_end_of_central_directory<R: Read + Seek>(
    reader: &mut R,
) -> Result<EndOfCentralDirectory> {
    let stream_len = reader.seek(SeekFrom::End(0))?;
    if stream_len < EOCD_LEN {
        return Err(malformed(format!(
            "Not a ZIP archive: {} bytes is shorter than an end of central directory record",
            stream_len
        )));
    }

    let tail_len = stream_len.min(EOCD_LEN + MAX_COMMENT_LEN);
    let tail_start = stream_len - tail_len;
    reader.seek(SeekFrom::Start(tail_start))?;
    let mut tail = vec![0u8; tail_len as usize];
    reader.read_exact(&mut tail)?;

    let signature = EOCD_SIGNATURE.to_le_bytes();
    let record_len = EOCD_LEN as usize;
    let record_pos = (0..=tail.len() - record_len)
        .rev()
        .find(|&pos| {
            let comment_len = u16::from_le_bytes([tail[pos + 20], tail[pos + 21]]) as usize;
            tail[pos..pos + 4] == signature && pos + record_len + comment_len == tail.len()
        })
        .ok_or_else(|| malformed("Not a ZIP archive: end of central directory not found"))?;
    trace!("End of central directory at offset {}", tail_start + record_pos as u64);

    let mut record = &tail[record_pos + 4..];
    let disk_number = record.read_u16::<LittleEndian>()?;
    let directory_disk = record.read_u16::<LittleEndian>()?;
    let _entries_on_disk = record.read_u16::<LittleEndian>()?;
    let num_entries = record.read_u16::<LittleEndian>()?;
    let directory_size = record.read_u32::<LittleEndian>()?;
    let directory_offset = record.read_u32::<LittleEndian>()?;

    if disk_number != 0 || directory_disk != 0 {
        return Err(malformed("Multi-disk archives are not supported"));
    }
    if num_entries == u16::MAX || directory_offset == u32::MAX || directory_size == u32::MAX {
        return Err(malformed("ZIP64 archives are not supported"));
    }
    if u64::from(directory_offset) + u64::from(directory_size) > stream_len {
        return Err(malformed(format!(
            "Central directory ({} bytes at {}) extends past end of archive ({} bytes)",
            directory_size, directory_offset, stream_len
        )));
    }

    Ok(EndOfCentralDirectory {
        num_entries,
        directory_size,
        directory_offset,
    })
}

/// Reads every central directory entry, in directory order.
pub fn parse_central_directory<R: Read + Seek>(
    reader: &mut R,
    eocd: &EndOfCentralDirectory,
) -> Result<Vec<EntryMeta>> {
    reader.seek(SeekFrom::Start(u64::from(eocd.directory_offset)))?;
    let mut directory = vec![0u8; eocd.directory_size as usize];
    reader.read_exact(&mut directory)?;

    let mut cursor = directory.as_slice();
    let mut entries = Vec::with_capacity(eocd.num_entries as usize);
    for index in 0..eocd.num_entries {
        let signature = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| malformed(format!("Central directory truncated at entry {}", index)))?;
        if signature != CENTRAL_HEADER_SIGNATURE {
            return Err(malformed(format!(
                "Bad central directory signature {:#010x} at entry {}",
                signature, index
            )));
        }
        entries.push(read_central_entry(&mut cursor).map_err(|e| match e {
            UnicodeTableError::ArchiveUnreadable(_) => {
                malformed(format!("Central directory truncated at entry {}", index))
            }
            other => other,
        })?);
    }

    debug!("Central directory lists {} entries", entries.len());
    Ok(entries)
}

fn read_central_entry<'a>(cursor: &mut &'a [u8]) -> Result<EntryMeta> {
    let _version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let flags = cursor.read_u16::<LittleEndian>()?;
    let method = cursor.read_u16::<LittleEndian>()?;
    let _mod_time = cursor.read_u16::<LittleEndian>()?;
    let _mod_date = cursor.read_u16::<LittleEndian>()?;
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let compressed_size = cursor.read_u32::<LittleEndian>()?;
    let uncompressed_size = cursor.read_u32::<LittleEndian>()?;
    let name_len = cursor.read_u16::<LittleEndian>()? as usize;
    let extra_len = cursor.read_u16::<LittleEndian>()? as usize;
    let comment_len = cursor.read_u16::<LittleEndian>()? as usize;
    let _disk_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let _external_attrs = cursor.read_u32::<LittleEndian>()?;
    let local_header_offset = cursor.read_u32::<LittleEndian>()?;

    let rest: &'a [u8] = *cursor;
    let variable_len = name_len + extra_len + comment_len;
    if rest.len() < variable_len {
        return Err(malformed("Central directory entry name runs past directory end"));
    }
    let name = String::from_utf8_lossy(&rest[..name_len]).into_owned();
    *cursor = &rest[variable_len..];

    Ok(EntryMeta {
        name,
        method,
        flags,
        crc32,
        compressed_size,
        uncompressed_size,
        local_header_offset,
    })
}

/// Reads the still-compressed payload of an entry, skipping its local header.
///
/// Sizes come from the central directory, since local headers may defer them
/// to a trailing data descriptor.
pub fn read_local_payload<R: Read + Seek>(reader: &mut R, entry: &EntryMeta) -> Result<Vec<u8>> {
    if entry.flags & FLAG_ENCRYPTED != 0 {
        return Err(malformed(format!("Encrypted entry not supported: {}", entry.name)));
    }

    let stream_len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(u64::from(entry.local_header_offset)))?;
    let signature = reader.read_u32::<LittleEndian>()?;
    if signature != LOCAL_HEADER_SIGNATURE {
        return Err(malformed(format!(
            "Bad local header signature {:#010x} for {}",
            signature, entry.name
        )));
    }

    // Only the variable-length field sizes matter; skip to them.
    reader.seek(SeekFrom::Start(
        u64::from(entry.local_header_offset) + LOCAL_HEADER_LEN - 4,
    ))?;
    let name_len = reader.read_u16::<LittleEndian>()?;
    let extra_len = reader.read_u16::<LittleEndian>()?;
    let data_start = u64::from(entry.local_header_offset)
        + LOCAL_HEADER_LEN
        + u64::from(name_len)
        + u64::from(extra_len);
    if data_start + u64::from(entry.compressed_size) > stream_len {
        return Err(malformed(format!(
            "Payload of {} ({} bytes at {}) extends past end of archive ({} bytes)",
            entry.name, entry.compressed_size, data_start, stream_len
        )));
    }
    reader.seek(SeekFrom::Start(data_start))?;

    let mut payload = vec![0u8; entry.compressed_size as usize];
    reader.read_exact(&mut payload).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            malformed(format!("Payload of {} is truncated", entry.name))
        } else {
            UnicodeTableError::ArchiveUnreadable(e)
        }
    })?;
    Ok(payload)
}
