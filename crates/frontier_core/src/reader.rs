use std::io::{self, Read, Seek, SeekFrom};

use crate::types::Point;

pub struct LittleEndianReader<R> {
    inner: R,
}

impl<R: Read + Seek> LittleEndianReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_f32(&mut self) -> io::Result<f32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    pub fn read_point(&mut self) -> io::Result<Point> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Point { x, y, z })
    }

    pub fn read_points(&mut self, n: usize) -> io::Result<Vec<Point>> {
        let mut result = Vec::with_capacity(n.min(4096));
        for _ in 0..n {
            result.push(self.read_point()?);
        }
        Ok(result)
    }

    pub fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;
        if read < n {
            return Err(short_read(n as u64, read as u64));
        }
        Ok(buf)
    }

    /// Byte string behind a one-byte length prefix.
    pub fn read_short_bytes(&mut self) -> io::Result<Vec<u8>> {
        let len = self.read_u8()? as usize;
        self.read_bytes(len)
    }

    /// Consume a four-byte length prefixed blob without keeping it.
    pub fn skip_long_bytes(&mut self) -> io::Result<()> {
        let len = self.read_u32()?;
        self.skip(u64::from(len))
    }

    pub fn read_short_string(&mut self) -> io::Result<String> {
        let bytes = self.read_short_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Consume a one-byte length prefixed string without keeping it.
    pub fn skip_short_string(&mut self) -> io::Result<()> {
        let len = self.read_u8()?;
        self.skip(len as u64)
    }

    /// Advance by `n` bytes, failing if the stream ends first.
    pub fn skip(&mut self, n: u64) -> io::Result<()> {
        let copied = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        if copied < n {
            return Err(short_read(n, copied));
        }
        Ok(())
    }

    pub fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    pub fn len(&mut self) -> io::Result<u64> {
        let cur = self.position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(cur))?;
        Ok(end)
    }

    pub fn is_empty(&mut self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn remaining(&mut self) -> io::Result<u64> {
        let cur = self.position()?;
        Ok(self.len()?.saturating_sub(cur))
    }

    pub fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.remaining()? == 0)
    }
}

fn short_read(wanted: u64, got: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("needed {wanted} bytes, only {got} available"),
    )
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_little_endian_scalars() {
        let mut bytes = Vec::new();
        bytes.push(7u8);
        bytes.extend_from_slice(&0x0102_0304u32.to_le_bytes());
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        let mut r = LittleEndianReader::new(Cursor::new(bytes));

        assert_eq!(r.read_u8().unwrap(), 7);
        assert_eq!(r.read_u32().unwrap(), 0x0102_0304);
        assert_eq!(r.read_f32().unwrap(), 1.5);
        assert!(r.at_end().unwrap());
    }

    #[test]
    fn skip_past_end_is_unexpected_eof() {
        let mut r = LittleEndianReader::new(Cursor::new(vec![0u8; 3]));
        let err = r.skip(4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn short_strings_are_length_prefixed() {
        let mut bytes = vec![4u8];
        bytes.extend_from_slice(b"Item");
        bytes.push(0);
        let mut r = LittleEndianReader::new(Cursor::new(bytes));

        assert_eq!(r.read_short_string().unwrap(), "Item");
        assert_eq!(r.read_short_string().unwrap(), "");
        assert!(r.read_short_bytes().is_err());
    }

    #[test]
    fn long_blobs_are_skipped_whole() {
        let mut bytes = 3u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 9]);
        let mut r = LittleEndianReader::new(Cursor::new(bytes));

        r.skip_long_bytes().unwrap();
        assert_eq!(r.read_u8().unwrap(), 9);

        let mut r = LittleEndianReader::new(Cursor::new(5u32.to_le_bytes().to_vec()));
        let err = r.skip_long_bytes().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
