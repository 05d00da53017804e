use std::io::{self, Read, Seek};

use log::warn;

use crate::category::{Category, animal_species_from_uuid, raider_type_from_uuid};
use crate::reader::LittleEndianReader;
use crate::types::{AnimalData, AnimalSpawnData, BaseData, Point, RaiderData, RaiderType};

use super::skip_item_stacks;

// Units (raiders, rams, animals) share a common prefix:
// 6 bytes, position, 28 bytes, unit name, hp, 1 byte, ...
const UNIT_HEADER_SKIP: u64 = 6;
const UNIT_AFTER_POSITION_SKIP: u64 = 28;
const UNIT_PAD: u64 = 1;

struct UnitPrefix {
    position: Point,
    hp: f32,
}

fn read_unit_prefix<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<UnitPrefix> {
    r.skip(UNIT_HEADER_SKIP)?;
    let position = r.read_point()?;
    r.skip(UNIT_AFTER_POSITION_SKIP)?;
    r.skip_short_string()?;
    let hp = r.read_f32()?;
    r.skip(UNIT_PAD)?;
    Ok(UnitPrefix { position, hp })
}

// --- Raider ---

const RAIDER_BEFORE_P2_SKIP: u64 = 4;

pub fn decode_raider<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<RaiderData> {
    let prefix = read_unit_prefix(r)?;
    let spawn = r.read_point()?;
    r.skip(UNIT_PAD)?;
    // Looted items.
    skip_item_stacks(r)?;
    let p1 = r.read_f32()?;
    r.skip(UNIT_PAD)?;
    // Own items.
    skip_item_stacks(r)?;
    r.skip(RAIDER_BEFORE_P2_SKIP)?;
    let p2 = r.read_f32()?;
    let uuid = r.read_short_bytes()?;
    let raider_type = raider_type_from_uuid(&uuid);
    if raider_type == RaiderType::Unknown {
        warn!("unknown raider unit {:?}", String::from_utf8_lossy(&uuid));
    }

    Ok(RaiderData {
        position: prefix.position,
        spawn,
        raider_type,
        hp: prefix.hp,
        p1,
        p2,
    })
}

// --- BatteringRam ---

pub fn decode_battering_ram<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
) -> io::Result<RaiderData> {
    let prefix = read_unit_prefix(r)?;
    let spawn = r.read_point()?;
    r.skip(UNIT_PAD)?;

    Ok(RaiderData {
        position: prefix.position,
        spawn,
        raider_type: RaiderType::BatteringRam,
        hp: prefix.hp,
        p1: 0.0,
        p2: 0.0,
    })
}

/// Raider record reduced to a position, for the enemies roster.
pub fn decode_enemy_position<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
) -> io::Result<BaseData> {
    r.skip(UNIT_HEADER_SKIP)?;
    let position = r.read_point()?;
    Ok(BaseData {
        position,
        category: Category::Raider,
    })
}

// --- Deer / Bear / Boar / Wolf / WolfDen ---

pub fn decode_animal_position<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
    category: Category,
) -> io::Result<BaseData> {
    r.skip(UNIT_HEADER_SKIP)?;
    let position = r.read_point()?;
    Ok(BaseData { position, category })
}

const ANIMAL_AFTER_PREFAB_SKIP: u64 = 2;

pub fn decode_animal_detail<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
) -> io::Result<AnimalData> {
    let prefix = read_unit_prefix(r)?;
    let _prefab = r.read_short_bytes()?;
    r.skip(ANIMAL_AFTER_PREFAB_SKIP)?;
    let spawn_count = r.read_u32()? as usize;
    let spawn_points = r.read_points(spawn_count)?;
    r.skip(UNIT_PAD)?;
    let wander_count = r.read_u32()? as usize;
    let wander_points = r.read_points(wander_count)?;
    r.skip(UNIT_PAD)?;
    let spawn_area = r.read_u32()?;

    Ok(AnimalData {
        position: prefix.position,
        spawn_points,
        wander_points,
        spawn_area,
        hp: prefix.hp,
    })
}

// --- AnimalManager ---

const ANIMAL_MANAGER_HEADER_SKIP: u64 = 2;
const HERD_HEADER_SKIP: u64 = 1;
const HERD_AFTER_NAME_SKIP: u64 = 15;
const HERD_CENTER_SKIP: u64 = 4;
const HERD_TRAILER_SKIP: u64 = 53;

pub fn decode_animal_spawns<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
) -> io::Result<Vec<AnimalSpawnData>> {
    r.skip(ANIMAL_MANAGER_HEADER_SKIP)?;

    let herd_count = r.read_u32()?;
    for _ in 0..herd_count {
        r.skip(HERD_HEADER_SKIP)?;
        let workers = r.read_u32()?;
        r.skip(u64::from(workers) * 4)?;
        r.skip_short_string()?;
        r.skip(HERD_AFTER_NAME_SKIP)?;
        if r.read_u8()? == 1 {
            r.skip(HERD_CENTER_SKIP)?;
        }
        r.skip(HERD_TRAILER_SKIP)?;
    }

    let area_count = r.read_u32()?;
    let mut out = Vec::new();
    for _ in 0..area_count {
        let spawn_area = r.read_u32()?;
        let uuid = r.read_short_bytes()?;
        let species = animal_species_from_uuid(&uuid);
        if species == Category::Unknown {
            warn!("unknown animal spawn {:?}", String::from_utf8_lossy(&uuid));
        }
        out.push(AnimalSpawnData {
            spawn_area,
            species,
        });
    }
    Ok(out)
}

// --- TownCenter / Shelter ---

const BUILDING_HEADER_SKIP: u64 = 7;

pub fn decode_building_position<R: Read + Seek>(
    r: &mut LittleEndianReader<R>,
    category: Category,
) -> io::Result<BaseData> {
    r.skip(BUILDING_HEADER_SKIP)?;
    let position = r.read_point()?;
    Ok(BaseData { position, category })
}

// --- CameraManager ---

const CAMERA_HEADER_SKIP: u64 = 1;

pub fn decode_camera<R: Read + Seek>(r: &mut LittleEndianReader<R>) -> io::Result<Point> {
    r.skip(CAMERA_HEADER_SKIP)?;
    r.read_point()
}
