use std::io::{self, Cursor};

use crate::decode::METADATA_HEADER_SKIP;
use crate::reader::LittleEndianReader;

use super::PacifistPolicy;

/// Version, seed and the four setting bytes ahead of the pacifist flag.
const METADATA_SETTINGS_WIDTH: usize = 4;

/// Rewrites the metadata payload with a new pacifist byte and, optionally,
/// a new name. Bytes after the last rewritten field are copied from where
/// the original cursor stopped, so a longer or shorter name shifts them.
pub fn patch_metadata(
    body: &[u8],
    name: Option<&str>,
    pacifist: PacifistPolicy,
) -> io::Result<Vec<u8>> {
    let mut r = LittleEndianReader::new(Cursor::new(body));
    let mut out = Vec::with_capacity(body.len() + name.map_or(0, str::len));

    out.extend_from_slice(&r.read_bytes(METADATA_HEADER_SKIP as usize)?);
    // Version and seed, unchanged.
    for _ in 0..2 {
        let field = r.read_short_bytes()?;
        push_short_bytes(&mut out, &field)?;
    }
    out.extend_from_slice(&r.read_bytes(METADATA_SETTINGS_WIDTH)?);

    let current = r.read_u8()?;
    out.push(pacifist.apply(current));

    if let Some(name) = name {
        let _previous = r.read_short_bytes()?;
        push_short_bytes(&mut out, name.as_bytes())?;
    }

    let consumed = r.position()? as usize;
    out.extend_from_slice(&body[consumed..]);
    Ok(out)
}

fn push_short_bytes(out: &mut Vec<u8>, bytes: &[u8]) -> io::Result<()> {
    let len = u8::try_from(bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("string is {} bytes, at most 255 fit", bytes.len()),
        )
    })?;
    out.push(len);
    out.extend_from_slice(bytes);
    Ok(())
}
