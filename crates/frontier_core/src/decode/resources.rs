use std::io::{self, Read, Seek};

use log::warn;

use crate::category::mineral_type_from_code;
use crate::items::GameItem;
use crate::reader::LittleEndianReader;
use crate::types::{ForageableData, MineralData, MineralType};

use super::skip_item_stacks;

// --- MineralManager ---

pub(crate) const MINERAL_HEADER_SKIP: u64 = 1;

pub fn decode_minerals<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<Vec<MineralData>> {
    r.skip(MINERAL_HEADER_SKIP)?;

    let mut out = Vec::new();
    for mineral_type in [MineralType::Clay, MineralType::Sand] {
        let count = r.read_u32()?;
        for _ in 0..count {
            let position = r.read_point()?;
            let radius = r.read_f32()?;
            let amount = r.read_u32()?;
            out.push(MineralData::new(mineral_type, position, radius, amount));
        }
    }

    let count = r.read_u32()?;
    for _ in 0..count {
        let _sub_id = r.read_u32()?;
        let mineral_type = mineral_type_from_code(r.read_u32()?);
        let position = r.read_point()?;
        let radius = r.read_f32()?;
        let amount = r.read_u32()?;
        out.push(MineralData::new(mineral_type, position, radius, amount));
    }

    Ok(out)
}

// --- ForageableResource ---

const FORAGEABLE_HEADER_SKIP: u64 = 5;
const FORAGEABLE_AFTER_POSITION_SKIP: u64 = 28;
const FORAGEABLE_AFTER_KIND_SKIP: u64 = 1;
const FORAGEABLE_BEFORE_YIELDS_SKIP: u64 = 31;

/// Decodes one forageable record into one entry per yielded item.
pub fn decode_forageables<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
) -> io::Result<Vec<ForageableData>> {
    r.skip(FORAGEABLE_HEADER_SKIP)?;
    let variable = r.read_u8()?;
    r.skip(1 + u64::from(variable) * 4)?;
    let position = r.read_point()?;
    r.skip(FORAGEABLE_AFTER_POSITION_SKIP)?;
    // Resource kind, e.g. "BerriesResource" or "BushResource".
    r.skip_short_string()?;
    r.skip(FORAGEABLE_AFTER_KIND_SKIP)?;
    skip_item_stacks(r)?;
    r.skip(FORAGEABLE_BEFORE_YIELDS_SKIP)?;

    let count = r.read_u32()?;
    let mut out = Vec::new();
    for _ in 0..count {
        let raw = r.read_short_bytes()?;
        let amount = r.read_u32()?;
        let item = GameItem::from_item_name(&raw);
        if item == GameItem::Unknown {
            warn!("unknown forageable item {:?}", String::from_utf8_lossy(&raw));
        }
        out.push(ForageableData {
            position,
            amount,
            item,
        });
    }
    Ok(out)
}
