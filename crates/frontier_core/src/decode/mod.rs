//! One decoding routine per record category. Every routine expects a reader
//! positioned at the first payload byte after the category id and fails with
//! `UnexpectedEof` rather than returning partial data.
//!
//! The skip counts are offsets recovered from observed saves. They carry no
//! self-description, so each lives as a named constant next to the grammar
//! that uses it.

mod resources;
mod units;
mod world;

use std::io::{self, Read, Seek};

use crate::reader::LittleEndianReader;

pub(crate) use resources::MINERAL_HEADER_SKIP;
pub use resources::{decode_forageables, decode_minerals};
pub use units::{
    decode_animal_detail, decode_animal_position, decode_animal_spawns, decode_battering_ram,
    decode_building_position, decode_camera, decode_enemy_position, decode_raider,
};
pub(crate) use world::METADATA_HEADER_SKIP;
pub use world::{decode_agriculture, decode_height_map, decode_metadata, decode_world_size};

/// Bytes between an inventory item's name and its count.
const ITEM_STACK_BODY: u64 = 417;

/// Skips `u32 count` followed by `count × {name, 417 bytes, u32 count}`.
fn skip_item_stacks<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<()> {
    let count = r.read_u32()?;
    for _ in 0..count {
        r.skip_short_string()?;
        r.skip(ITEM_STACK_BODY)?;
        let _count = r.read_u32()?;
    }
    Ok(())
}

/// Skips `u32 count` followed by `count × stride` bytes.
fn skip_fixed_array<R: Read + Seek>(r: &mut LittleEndianReader<R>, stride: u64) -> io::Result<u32> {
    let count = r.read_u32()?;
    r.skip(checked_span(u64::from(count), stride)?)?;
    Ok(count)
}

fn checked_span(count: u64, stride: u64) -> io::Result<u64> {
    count.checked_mul(stride).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("array of {count} × {stride} bytes overflows"),
        )
    })
}

/// Rejects grids whose declared sample count cannot fit in what is left.
fn ensure_available<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
    samples: u64,
    what: &str,
) -> io::Result<()> {
    let needed = samples.saturating_mul(4);
    let remaining = r.remaining()?;
    if needed > remaining {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{what} declares {needed} sample bytes, only {remaining} remain"),
        ));
    }
    Ok(())
}
