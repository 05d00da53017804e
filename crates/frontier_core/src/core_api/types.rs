use serde::Serialize;

use crate::category::Category;
use crate::types::{
    AgricultureGrid, AnimalData, AnimalSpawnData, BaseData, ForageableData, GeneralSaveData,
    HeightMap, MineralData, Point, RaiderData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub file_len: u64,
    pub record_count: usize,
    pub categories: Vec<CategoryCount>,
    pub metadata: GeneralSaveData,
    pub camera: Point,
    pub world_size: Option<(f32, f32)>,
}

/// One decoded record, tagged by what its category decodes to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DecodedRecord {
    Minerals(Vec<MineralData>),
    Forageables(Vec<ForageableData>),
    Raider(RaiderData),
    Animal(AnimalData),
    AnimalPosition(BaseData),
    AnimalSpawns(Vec<AnimalSpawnData>),
    Building(BaseData),
    Camera(Point),
    Metadata(GeneralSaveData),
    Agriculture(AgricultureGrid),
    HeightMap(HeightMap),
    /// Categories without a payload decoder; only the size is reported.
    Opaque { category: Category, payload_len: u64 },
}
