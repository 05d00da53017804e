//! Single forward pass over a save that frames every record and indexes
//! payload offsets by category.
//!
//! Record framing, little endian throughout:
//!
//! ```text
//! u8   kind tag
//! u8   kind name length, then that many bytes
//! u32  payload length (counts the category id)
//! u32  category id
//! ...  payload length - 4 bytes
//! ```

use std::collections::HashMap;
use std::io::{self, Read, Seek};

use log::debug;

use crate::category::Category;
use crate::layout::{ByteRange, FileLayout, RecordLayout};
use crate::reader::LittleEndianReader;

pub const CATEGORY_ID_WIDTH: u32 = 4;

/// Header fields of one record as read from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub kind_tag: u8,
    pub kind_name: Vec<u8>,
    pub payload_len: u32,
    pub category_id: u32,
}

impl RecordHeader {
    pub fn category(&self) -> Category {
        Category::from_id(self.category_id)
    }

    /// Bytes that follow the category id.
    pub fn body_len(&self) -> u64 {
        u64::from(self.payload_len - CATEGORY_ID_WIDTH)
    }

    pub fn encoded_len(&self) -> u64 {
        1 + 1 + self.kind_name.len() as u64 + 4 + u64::from(self.payload_len)
    }

    /// Reads a header, or `None` at a clean end of stream.
    pub fn read<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<Option<Self>> {
        if r.at_end()? {
            return Ok(None);
        }
        let start = r.position()?;
        let header = Self::read_fields(r).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("record header at offset {start} cut short: {e}"),
                )
            } else {
                e
            }
        })?;
        if header.payload_len < CATEGORY_ID_WIDTH {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "record at offset {start} declares payload length {} (< {CATEGORY_ID_WIDTH})",
                    header.payload_len
                ),
            ));
        }
        Ok(Some(header))
    }

    fn read_fields<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<Self> {
        let kind_tag = r.read_u8()?;
        let kind_name = r.read_short_bytes()?;
        let payload_len = r.read_u32()?;
        let category_id = r.read_u32()?;
        Ok(Self {
            kind_tag,
            kind_name,
            payload_len,
            category_id,
        })
    }

    /// Writes the header with the payload length taken from `body_len`.
    pub fn emit_to_vec(&self, body_len: usize, out: &mut Vec<u8>) -> io::Result<()> {
        let kind_name_len = u8::try_from(self.kind_name.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("record kind name too long: {} bytes", self.kind_name.len()),
            )
        })?;
        let payload_len = u32::try_from(body_len)
            .ok()
            .and_then(|len| len.checked_add(CATEGORY_ID_WIDTH))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("record payload too large: {body_len} bytes"),
                )
            })?;
        out.push(self.kind_tag);
        out.push(kind_name_len);
        out.extend_from_slice(&self.kind_name);
        out.extend_from_slice(&payload_len.to_le_bytes());
        out.extend_from_slice(&self.category_id.to_le_bytes());
        Ok(())
    }
}

/// Payload ranges per category, in file order. Never mutated after the scan.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    entries: HashMap<Category, Vec<ByteRange>>,
}

impl CategoryIndex {
    pub fn payloads(&self, category: Category) -> &[ByteRange] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn payload(&self, category: Category, occurrence: usize) -> Option<ByteRange> {
        self.payloads(category).get(occurrence).copied()
    }

    /// Start offsets of every payload of `category`.
    pub fn offsets(&self, category: Category) -> Vec<u64> {
        self.payloads(category).iter().map(|p| p.start).collect()
    }

    pub fn offset(&self, category: Category, occurrence: usize) -> Option<u64> {
        self.payload(category, occurrence).map(|p| p.start)
    }

    pub fn count(&self, category: Category) -> usize {
        self.payloads(category).len()
    }

    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    fn push(&mut self, category: Category, payload: ByteRange) {
        self.entries.entry(category).or_default().push(payload);
    }
}

/// Index plus the full record layout, produced by [`scan`].
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub index: CategoryIndex,
    pub layout: FileLayout,
}

pub fn scan<R: Read + Seek>(reader: R) -> io::Result<ScanResult> {
    let mut r = LittleEndianReader::new(reader);
    let file_len = r.len()?;
    let mut index = CategoryIndex::default();
    let mut records = Vec::new();

    loop {
        let start = r.position()?;
        let Some(header) = RecordHeader::read(&mut r)? else {
            break;
        };
        let payload_start = r.position()?;
        let body_len = header.body_len();
        let remaining = file_len.saturating_sub(payload_start);
        if body_len > remaining {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "record at offset {start} ({}) declares {body_len} payload bytes, only {remaining} remain",
                    header.category()
                ),
            ));
        }
        r.skip(body_len)?;
        let end = payload_start + body_len;

        let category = header.category();
        debug!("record {category} id={} at {start}..{end}", header.category_id);
        let payload = ByteRange {
            start: payload_start,
            end,
        };
        index.push(category, payload);
        records.push(RecordLayout {
            kind_tag: header.kind_tag,
            kind_name: String::from_utf8_lossy(&header.kind_name).into_owned(),
            category_id: header.category_id,
            category,
            range: ByteRange { start, end },
            payload,
        });
    }

    let layout = FileLayout { file_len, records };
    layout.validate()?;
    Ok(ScanResult { index, layout })
}
