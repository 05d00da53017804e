use std::io;

use serde::Serialize;

use crate::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One framed record: the whole span and the payload after the category id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordLayout {
    pub kind_tag: u8,
    pub kind_name: String,
    pub category_id: u32,
    pub category: Category,
    pub range: ByteRange,
    pub payload: ByteRange,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FileLayout {
    pub file_len: u64,
    pub records: Vec<RecordLayout>,
}

impl FileLayout {
    /// Records must be back to back and end exactly at end of file.
    pub fn validate(&self) -> io::Result<()> {
        let mut expected = 0u64;
        for (idx, record) in self.records.iter().enumerate() {
            if record.range.start != expected {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "layout gap/overlap at record {idx} ({}): expected start {}, got {}",
                        record.category, expected, record.range.start
                    ),
                ));
            }
            if record.range.end < record.range.start
                || record.payload.start < record.range.start
                || record.payload.end != record.range.end
            {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "invalid record range at {idx} ({}): {}..{}, payload {}..{}",
                        record.category,
                        record.range.start,
                        record.range.end,
                        record.payload.start,
                        record.payload.end
                    ),
                ));
            }
            expected = record.range.end;
        }

        if expected != self.file_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "layout does not cover file: ended at {}, file length {}",
                    expected, self.file_len
                ),
            ));
        }

        Ok(())
    }

    pub fn count(&self, category: Category) -> usize {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .count()
    }
}
