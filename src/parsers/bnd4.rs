//! BND4 archive container parser.
//!
//! Only the entry table is decoded: each entry's id, name and payload bytes.
//! Nested payloads are parsed by whoever consumes the entry (the pipeline
//! parses FLVER-named entries and ignores the rest).

use crate::error::{FlverDiffError, ParseErrorKind, Result};

use super::reader::{ByteReader, ReadResult};

pub(crate) const BND4_MAGIC: &[u8] = b"BND4";

const HEADER_SIZE: usize = 0x40;
const ENTRY_SIZE: usize = 0x24;

/// One file nested in a BND4 archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub id: i32,
    /// Entry path as stored in the archive, backslashes and all.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    /// Final path component without extension, used as the root path label
    /// when diffing this entry.
    pub fn stem(&self) -> &str {
        let name = self
            .name
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(self.name.as_str());
        name.split('.').next().unwrap_or(name)
    }
}

/// Parse a BND4 archive's entry table.
pub fn parse_bnd4(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut r = ByteReader::new(bytes);
    read_entries(&mut r, bytes).map_err(|e| FlverDiffError::parse("BND4 archive", e))
}

fn read_entries(r: &mut ByteReader, data: &[u8]) -> ReadResult<Vec<ArchiveEntry>> {
    r.assert_magic(BND4_MAGIC)?;
    r.skip(2)?; // unk04, unk05
    r.skip(3)?;
    let big_endian = r.read_bool()?;
    r.set_big_endian(big_endian);
    r.skip(2)?; // bit order, pad
    let file_count = r.read_u32()?;
    let header_size = r.read_u64()?;
    if header_size != HEADER_SIZE as u64 {
        return Err(ParseErrorKind::InvalidValue {
            field: "HeaderSize".to_owned(),
            message: format!("expected {HEADER_SIZE:#x}, found {header_size:#x}"),
        });
    }
    let version = r.read_fixed_ascii(8)?;
    let entry_size = r.read_u64()?;
    if entry_size != ENTRY_SIZE as u64 {
        return Err(ParseErrorKind::InvalidValue {
            field: "FileHeaderSize".to_owned(),
            message: format!("expected {ENTRY_SIZE:#x}, found {entry_size:#x}"),
        });
    }
    let _headers_end = r.read_u64()?;
    let unicode = r.read_bool()?;
    let _format = r.read_u8()?;
    let _extended = r.read_u8()?;
    tracing::debug!("parsed BND4 header: version {version:?}, {file_count} entries, unicode={unicode}");

    if (file_count as usize).saturating_mul(ENTRY_SIZE) > data.len() {
        return Err(ParseErrorKind::InvalidValue {
            field: "FileCount".to_owned(),
            message: format!("entry table of {file_count} entries exceeds archive size"),
        });
    }

    let mut entries = Vec::with_capacity(file_count as usize);
    for i in 0..file_count {
        r.seek(HEADER_SIZE + i as usize * ENTRY_SIZE)?;
        entries.push(read_entry(r, data, unicode)?);
    }
    Ok(entries)
}

fn read_entry(r: &mut ByteReader, data: &[u8], unicode: bool) -> ReadResult<ArchiveEntry> {
    let _raw_flags = r.read_u8()?;
    r.skip(3)?;
    let _minus_one = r.read_i32()?;
    let compressed_size = r.read_u64()?;
    let _uncompressed_size = r.read_u64()?;
    let data_offset = r.read_u32()?;
    let id = r.read_i32()?;
    let name_offset = r.read_u32()?;

    let name = if unicode {
        r.read_utf16_at(name_offset as usize)?
    } else {
        r.read_cstr_at(name_offset as usize)?
    };

    let start = data_offset as usize;
    let end = start
        .checked_add(compressed_size as usize)
        .filter(|&end| end <= data.len())
        .ok_or(ParseErrorKind::UnexpectedEof {
            offset: start,
            needed: compressed_size as usize,
        })?;

    Ok(ArchiveEntry {
        id,
        name,
        bytes: data[start..end].to_vec(),
    })
}
