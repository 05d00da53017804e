use std::io::{self, Read, Seek};

use crate::reader::LittleEndianReader;
use crate::types::{AGRICULTURE_LAYER_COUNT, AgricultureGrid, GeneralSaveData, HeightMap};

use super::{ensure_available, skip_fixed_array};

// --- MetaData ---

pub(crate) const METADATA_HEADER_SKIP: u64 = 5;

pub fn decode_metadata<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
) -> io::Result<GeneralSaveData> {
    r.skip(METADATA_HEADER_SKIP)?;
    let version = r.read_short_string()?;
    let seed = r.read_short_string()?;
    let v1 = r.read_u8()?;
    let v2 = r.read_u8()?;
    let wildlife_difficulty = r.read_u8()?;
    let raiders_difficulty = r.read_u8()?;
    let pacifist = r.read_u8()?;
    let name = r.read_short_string()?;
    let villagers = r.read_u32()?;
    let years = r.read_u32()?;
    let v3 = r.read_u32()?;
    let v4 = r.read_u32()?;
    let timestamp = r.read_u32()?;
    let hours = r.read_u32()?;
    let mins = r.read_u32()?;
    // Screenshot image, not kept.
    r.skip_long_bytes()?;

    Ok(GeneralSaveData {
        version,
        seed,
        name,
        villagers,
        years,
        hours,
        mins,
        timestamp,
        v1,
        v2,
        v3,
        v4,
        wildlife_difficulty,
        raiders_difficulty,
        pacifist,
    })
}

// --- AgricultureManager ---

const AGRICULTURE_HEADER_SKIP: u64 = 6;

pub fn decode_world_size<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<(f32, f32)> {
    r.skip(AGRICULTURE_HEADER_SKIP)?;
    let width = r.read_f32()?;
    let height = r.read_f32()?;
    Ok((width, height))
}

/// Cells are stored `[x][y][layer]`; the result holds one `[x][y]` grid per layer.
pub fn decode_agriculture<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
) -> io::Result<AgricultureGrid> {
    let (world_width, world_height) = decode_world_size(r)?;
    let width = r.read_u32()? as usize;
    let height = r.read_u32()? as usize;
    ensure_available(
        r,
        (width as u64)
            .saturating_mul(height as u64)
            .saturating_mul(AGRICULTURE_LAYER_COUNT as u64),
        "agriculture grid",
    )?;

    let mut layers: [Vec<Vec<f32>>; AGRICULTURE_LAYER_COUNT] =
        std::array::from_fn(|_| Vec::with_capacity(width));
    for _ in 0..width {
        for layer in layers.iter_mut() {
            layer.push(Vec::with_capacity(height));
        }
        for _ in 0..height {
            for layer in layers.iter_mut() {
                let value = r.read_f32()?;
                if let Some(column) = layer.last_mut() {
                    column.push(value);
                }
            }
        }
    }

    Ok(AgricultureGrid {
        world_width,
        world_height,
        width,
        height,
        layers,
    })
}

// --- TerrainManager ---

const TERRAIN_HEADER_SKIP: u64 = 1;
const REGROWN_TREE_STRIDE: u64 = 96;
const TREE_GROWTH_STRIDE: u64 = 100;
const CHOPPED_TREE_STRIDE: u64 = 12;
const TERRAIN_OBJECT_STRIDE: u64 = 122;
const PATCH_HEADER_SKIP: u64 = 24;
const PATCH_ENTRY_STRIDE: u64 = 16;
const PATCH_TRAILER_SKIP: u64 = 2;
const TERRAIN_TAIL_STRIDE: u64 = 81;

pub fn decode_height_map<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<HeightMap> {
    r.skip(TERRAIN_HEADER_SKIP)?;
    skip_fixed_array(r, REGROWN_TREE_STRIDE)?;
    skip_fixed_array(r, TREE_GROWTH_STRIDE)?;
    skip_fixed_array(r, CHOPPED_TREE_STRIDE)?;
    skip_fixed_array(r, TERRAIN_OBJECT_STRIDE)?;

    let patches = r.read_u32()?;
    for _ in 0..patches {
        r.skip(PATCH_HEADER_SKIP)?;
        skip_fixed_array(r, PATCH_ENTRY_STRIDE)?;
        r.skip(PATCH_TRAILER_SKIP)?;
    }
    skip_fixed_array(r, TERRAIN_TAIL_STRIDE)?;

    let size = r.read_u32()? as usize;
    let total = r.read_u32()?;
    ensure_available(r, (size as u64).saturating_mul(size as u64), "height map")?;

    let mut samples = Vec::with_capacity(size);
    for _ in 0..size {
        let mut row = Vec::with_capacity(size);
        for _ in 0..size {
            row.push(r.read_f32()?);
        }
        samples.push(row);
    }

    Ok(HeightMap {
        size,
        total,
        samples,
    })
}
