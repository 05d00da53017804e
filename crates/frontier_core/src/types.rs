use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::items::GameItem;

/// World position. `y` is elevation; `x`/`z` span the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn emit_to_vec(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
        out.extend_from_slice(&self.z.to_le_bytes());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MineralType {
    Iron,
    Gold,
    Coal,
    Clay,
    Sand,
    Unknown,
}

impl MineralType {
    /// Iron, gold and coal share the combined metal sub-array.
    pub fn is_metal(&self) -> bool {
        matches!(self, Self::Iron | Self::Gold | Self::Coal)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Iron => "Iron",
            Self::Gold => "Gold",
            Self::Coal => "Coal",
            Self::Clay => "Clay",
            Self::Sand => "Sand",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MineralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MineralData {
    pub position: Point,
    pub radius: f32,
    pub amount: u32,
    pub mineral_type: MineralType,
    /// Not stored per element on disk; decoders always report `false`.
    pub infinite: bool,
}

impl MineralData {
    pub fn new(mineral_type: MineralType, position: Point, radius: f32, amount: u32) -> Self {
        Self {
            position,
            radius,
            amount,
            mineral_type,
            infinite: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForageableData {
    pub position: Point,
    pub amount: u32,
    pub item: GameItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaiderType {
    Thief,
    Brawler,
    Warrior,
    Shieldbearer,
    Warmaster,
    Arbalest,
    Champion,
    Footman,
    HeavyInfantry,
    BatteringRam,
    Unknown,
}

impl RaiderType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Thief => "Thief",
            Self::Brawler => "Brawler",
            Self::Warrior => "Warrior",
            Self::Shieldbearer => "Shieldbearer",
            Self::Warmaster => "Warmaster",
            Self::Arbalest => "Arbalest",
            Self::Champion => "Champion",
            Self::Footman => "Footman",
            Self::HeavyInfantry => "HeavyInfantry",
            Self::BatteringRam => "BatteringRam",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RaiderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaiderData {
    pub position: Point,
    pub spawn: Point,
    pub raider_type: RaiderType,
    pub hp: f32,
    /// Opaque float following the looted item list (observed as 250).
    pub p1: f32,
    /// Opaque float following the carried item list (observed as 250).
    pub p2: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalData {
    pub position: Point,
    pub spawn_points: Vec<Point>,
    pub wander_points: Vec<Point>,
    pub spawn_area: u32,
    pub hp: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalSpawnData {
    pub spawn_area: u32,
    pub species: Category,
}

/// Position plus category for animals, buildings and enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseData {
    pub position: Point,
    pub category: Category,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSaveData {
    pub version: String,
    pub seed: String,
    pub name: String,
    pub villagers: u32,
    pub years: u32,
    pub hours: u32,
    pub mins: u32,
    pub timestamp: u32,
    pub v1: u8,
    pub v2: u8,
    pub v3: u32,
    pub v4: u32,
    pub wildlife_difficulty: u8,
    pub raiders_difficulty: u8,
    pub pacifist: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgricultureLayer {
    EnvFertility,
    Fertility,
    Honey,
    OriginalHoney,
    Fodder,
    OriginalFodder,
    Water,
    OriginalWater,
    ClaySand,
}

pub const AGRICULTURE_LAYER_COUNT: usize = 9;

impl AgricultureLayer {
    /// Interleaving order of the layers within one grid cell.
    pub const ALL: [AgricultureLayer; AGRICULTURE_LAYER_COUNT] = [
        AgricultureLayer::EnvFertility,
        AgricultureLayer::Fertility,
        AgricultureLayer::Honey,
        AgricultureLayer::OriginalHoney,
        AgricultureLayer::Fodder,
        AgricultureLayer::OriginalFodder,
        AgricultureLayer::Water,
        AgricultureLayer::OriginalWater,
        AgricultureLayer::ClaySand,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::EnvFertility => "EnvFertility",
            Self::Fertility => "Fertility",
            Self::Honey => "Honey",
            Self::OriginalHoney => "OriginalHoney",
            Self::Fodder => "Fodder",
            Self::OriginalFodder => "OriginalFodder",
            Self::Water => "Water",
            Self::OriginalWater => "OriginalWater",
            Self::ClaySand => "ClaySand",
        }
    }
}

/// Nine parallel `[x][y]` float layers covering the playable world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgricultureGrid {
    pub world_width: f32,
    pub world_height: f32,
    pub width: usize,
    pub height: usize,
    pub layers: [Vec<Vec<f32>>; AGRICULTURE_LAYER_COUNT],
}

impl AgricultureGrid {
    pub fn layer(&self, layer: AgricultureLayer) -> &[Vec<f32>] {
        &self.layers[layer.index()]
    }

    pub fn value(&self, layer: AgricultureLayer, x: usize, y: usize) -> Option<f32> {
        self.layers[layer.index()]
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Square elevation grid from the terrain record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeightMap {
    pub size: usize,
    pub total: u32,
    pub samples: Vec<Vec<f32>>,
}

impl HeightMap {
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.samples.get(i).and_then(|row| row.get(j)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
