use std::io::{self, Cursor};

use crate::category::mineral_code;
use crate::decode::MINERAL_HEADER_SKIP;
use crate::reader::LittleEndianReader;
use crate::types::{MineralData, MineralType};

/// Position and radius of a clay or sand deposit, ahead of its amount.
const SURFACE_ELEMENT_HEAD: usize = 16;
/// Type code, position and radius of a metal deposit, after its sub id.
const METAL_ELEMENT_HEAD: usize = 20;
const METAL_TABLE_STRIDE: usize = 32;
const METAL_TABLE_SEPARATOR: usize = 1;
const METAL_LOOKUP_STRIDE: usize = 20;

/// Re-emits the mineral payload, optionally doubling every existing amount
/// and appending `new_minerals` to the sub-array matching their type.
/// Each inserted metal also gets an entry in both trailing metal tables.
pub fn patch_minerals(
    body: &[u8],
    double: bool,
    new_minerals: &[MineralData],
) -> io::Result<Vec<u8>> {
    let mut r = LittleEndianReader::new(Cursor::new(body));
    let mut out = Vec::with_capacity(body.len() + new_minerals.len() * 96);

    out.extend_from_slice(&r.read_bytes(MINERAL_HEADER_SKIP as usize)?);

    for kind in [MineralType::Clay, MineralType::Sand] {
        let added: Vec<&MineralData> = new_minerals
            .iter()
            .filter(|m| m.mineral_type == kind)
            .collect();
        let count = r.read_u32()?;
        push_count(&mut out, count, added.len(), kind.as_str())?;
        for _ in 0..count {
            out.extend_from_slice(&r.read_bytes(SURFACE_ELEMENT_HEAD)?);
            let amount = scale(r.read_u32()?, double)?;
            out.extend_from_slice(&amount.to_le_bytes());
        }
        for mineral in added {
            mineral.position.emit_to_vec(&mut out);
            out.extend_from_slice(&mineral.radius.to_le_bytes());
            out.extend_from_slice(&mineral.amount.to_le_bytes());
        }
    }

    let metals: Vec<(u32, &MineralData)> = new_minerals
        .iter()
        .filter(|m| m.mineral_type.is_metal())
        .map(|m| {
            mineral_code(m.mineral_type).map(|code| (code, m)).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("no type code for {}", m.mineral_type),
                )
            })
        })
        .collect::<io::Result<_>>()?;

    let count = r.read_u32()?;
    push_count(&mut out, count, metals.len(), "metal")?;
    let mut highest_sub_id = 0u32;
    for _ in 0..count {
        let sub_id = r.read_u32()?;
        highest_sub_id = highest_sub_id.max(sub_id);
        out.extend_from_slice(&sub_id.to_le_bytes());
        out.extend_from_slice(&r.read_bytes(METAL_ELEMENT_HEAD)?);
        let amount = scale(r.read_u32()?, double)?;
        out.extend_from_slice(&amount.to_le_bytes());
    }
    let mut next_sub_id = highest_sub_id;
    for (code, mineral) in &metals {
        next_sub_id = next_sub_id.checked_add(1).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "metal sub id space exhausted")
        })?;
        out.extend_from_slice(&next_sub_id.to_le_bytes());
        out.extend_from_slice(&code.to_le_bytes());
        mineral.position.emit_to_vec(&mut out);
        out.extend_from_slice(&mineral.radius.to_le_bytes());
        out.extend_from_slice(&mineral.amount.to_le_bytes());
    }

    // Trailing metal tables. Their layout past the type code and position
    // is not interpreted, so existing entries are copied untouched.
    let count = r.read_u32()?;
    push_count(&mut out, count, metals.len(), "metal table")?;
    out.extend_from_slice(&r.read_bytes(table_len(count, METAL_TABLE_STRIDE)?)?);
    for (code, mineral) in &metals {
        push_table_entry(&mut out, *code, mineral, METAL_TABLE_STRIDE);
    }
    out.extend_from_slice(&r.read_bytes(METAL_TABLE_SEPARATOR)?);

    let count = r.read_u32()?;
    push_count(&mut out, count, metals.len(), "metal lookup")?;
    out.extend_from_slice(&r.read_bytes(table_len(count, METAL_LOOKUP_STRIDE)?)?);
    for (code, mineral) in &metals {
        push_table_entry(&mut out, *code, mineral, METAL_LOOKUP_STRIDE);
    }

    let consumed = r.position()? as usize;
    out.extend_from_slice(&body[consumed..]);
    Ok(out)
}

fn scale(amount: u32, double: bool) -> io::Result<u32> {
    if !double {
        return Ok(amount);
    }
    amount.checked_mul(2).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("doubling mineral amount {amount} overflows"),
        )
    })
}

fn push_count(out: &mut Vec<u8>, existing: u32, added: usize, what: &str) -> io::Result<()> {
    let total = u32::try_from(added)
        .ok()
        .and_then(|added| existing.checked_add(added))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("too many {what} entries: {existing} + {added}"),
            )
        })?;
    out.extend_from_slice(&total.to_le_bytes());
    Ok(())
}

fn table_len(count: u32, stride: usize) -> io::Result<usize> {
    (count as usize).checked_mul(stride).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("metal table of {count} entries cannot fit in a payload"),
        )
    })
}

fn push_table_entry(out: &mut Vec<u8>, code: u32, mineral: &MineralData, stride: usize) {
    let start = out.len();
    out.extend_from_slice(&code.to_le_bytes());
    mineral.position.emit_to_vec(out);
    out.resize(start + stride, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn body_with(clay: &[u32], metals: &[(u32, u32)], tail: &[u8]) -> Vec<u8> {
        let mut body = vec![7u8];
        body.extend_from_slice(&(clay.len() as u32).to_le_bytes());
        for amount in clay {
            body.extend_from_slice(&[0u8; SURFACE_ELEMENT_HEAD]);
            body.extend_from_slice(&amount.to_le_bytes());
        }
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(&(metals.len() as u32).to_le_bytes());
        for (sub_id, amount) in metals {
            body.extend_from_slice(&sub_id.to_le_bytes());
            body.extend_from_slice(&[0u8; METAL_ELEMENT_HEAD]);
            body.extend_from_slice(&amount.to_le_bytes());
        }
        body.extend_from_slice(&0u32.to_le_bytes());
        body.push(0xEE);
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(tail);
        body
    }

    #[test]
    fn doubles_every_existing_amount() {
        let body = body_with(&[10, 20], &[(1, 5)], &[1, 2, 3]);
        let out = patch_minerals(&body, true, &[]).unwrap();
        assert_eq!(out, body_with(&[20, 40], &[(1, 10)], &[1, 2, 3]));
    }

    #[test]
    fn doubling_overflow_is_invalid_input() {
        let body = body_with(&[u32::MAX], &[], &[]);
        let err = patch_minerals(&body, true, &[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn inserted_metal_gets_next_sub_id_and_table_entries() {
        let body = body_with(&[], &[(3, 100), (8, 100)], &[9, 9]);
        let gold = MineralData::new(MineralType::Gold, Point::new(1.0, 2.0, 3.0), 4.0, 50);
        let out = patch_minerals(&body, false, &[gold]).unwrap();

        // header, clay count, sand count, metal count, two metals
        let metals_at = 1 + 4 + 4 + 4 + 2 * 28;
        assert_eq!(&out[9..13], &3u32.to_le_bytes());
        assert_eq!(&out[metals_at..metals_at + 4], &9u32.to_le_bytes());
        assert_eq!(&out[metals_at + 4..metals_at + 8], &1u32.to_le_bytes());

        let table_at = metals_at + 28;
        assert_eq!(&out[table_at..table_at + 4], &1u32.to_le_bytes());
        assert_eq!(&out[table_at + 4..table_at + 8], &1u32.to_le_bytes());
        assert_eq!(&out[table_at + 8..table_at + 12], &1.0f32.to_le_bytes());
        let separator_at = table_at + 4 + METAL_TABLE_STRIDE;
        assert_eq!(out[separator_at], 0xEE);

        let lookup_at = separator_at + 1;
        assert_eq!(&out[lookup_at..lookup_at + 4], &1u32.to_le_bytes());
        let tail_at = lookup_at + 4 + METAL_LOOKUP_STRIDE;
        assert_eq!(&out[tail_at..], &[9, 9]);
        assert_eq!(out.len(), body.len() + 28 + METAL_TABLE_STRIDE + METAL_LOOKUP_STRIDE);
    }
}
