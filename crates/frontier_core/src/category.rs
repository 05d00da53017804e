use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{MineralType, RaiderType};

/// Semantic meaning of a record's numeric category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    AgricultureManager,
    AnimalManager,
    BatteringRam,
    Bear,
    Boar,
    BuildingBuildSite,
    BuildingBuildSiteGuids,
    CameraManager,
    Deer,
    FoWSystem,
    ForageableResource,
    MineralManager,
    MetaData,
    Raider,
    Shelter,
    TerrainManager,
    TownCenter,
    Wolf,
    WolfDen,
    Unknown,
}

#[rustfmt::skip]
const CATEGORY_IDS: &[(u32, Category)] = &[
    (  272_625_919, Category::FoWSystem),
    (  274_602_495, Category::MineralManager),
    (  482_861_567, Category::Deer),
    (  545_559_295, Category::Raider),
    (  788_030_719, Category::CameraManager),
    (  912_881_919, Category::ForageableResource),
    (1_357_454_847, Category::AnimalManager),
    (1_358_854_911, Category::Bear),
    (1_676_811_007, Category::WolfDen),
    (1_767_231_999, Category::TerrainManager),
    (2_094_352_639, Category::BatteringRam),
    (2_116_582_911, Category::AgricultureManager),
    (2_831_428_095, Category::Shelter),
    (2_921_281_535, Category::Wolf),
    (3_005_595_647, Category::Boar),
    (3_556_611_327, Category::TownCenter),
    (3_982_492_927, Category::MetaData),
    (3_997_403_647, Category::BuildingBuildSite),
    (4_058_971_987, Category::BuildingBuildSiteGuids),
];

impl Category {
    /// Animal categories whose records share the simple position grammar.
    pub const ANIMALS: [Category; 5] = [
        Category::Deer,
        Category::Bear,
        Category::Boar,
        Category::Wolf,
        Category::WolfDen,
    ];

    pub fn from_id(id: u32) -> Self {
        CATEGORY_IDS
            .iter()
            .find(|(raw, _)| *raw == id)
            .map(|(_, category)| *category)
            .unwrap_or(Category::Unknown)
    }

    /// Case-insensitive lookup by name, e.g. `mineralmanager`.
    pub fn from_name(name: &str) -> Option<Self> {
        CATEGORY_IDS
            .iter()
            .map(|(_, category)| *category)
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
    }

    /// Numeric id used on disk; `None` for `Unknown`.
    pub fn id(&self) -> Option<u32> {
        CATEGORY_IDS
            .iter()
            .find(|(_, category)| category == self)
            .map(|(raw, _)| *raw)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::AgricultureManager => "AgricultureManager",
            Self::AnimalManager => "AnimalManager",
            Self::BatteringRam => "BatteringRam",
            Self::Bear => "Bear",
            Self::Boar => "Boar",
            Self::BuildingBuildSite => "BuildingBuildSite",
            Self::BuildingBuildSiteGuids => "BuildingBuildSiteGuids",
            Self::CameraManager => "CameraManager",
            Self::Deer => "Deer",
            Self::FoWSystem => "FoWSystem",
            Self::ForageableResource => "ForageableResource",
            Self::MineralManager => "MineralManager",
            Self::MetaData => "MetaData",
            Self::Raider => "Raider",
            Self::Shelter => "Shelter",
            Self::TerrainManager => "TerrainManager",
            Self::TownCenter => "TownCenter",
            Self::Wolf => "Wolf",
            Self::WolfDen => "WolfDen",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Spawn-area prefab UUIDs. The difficulty variant is noted per entry.
#[rustfmt::skip]
const ANIMAL_SPAWN_UUIDS: &[(&str, Category)] = &[
    ("7361af1e-8897-4099-b372-dfe646d10328", Category::Bear), // hard
    ("ac4a8fd7-b9cb-44e4-be78-105e11c07bd1", Category::Bear), // normal
    ("621e052e-99cb-483f-8cd8-6f0612e6d32c", Category::Bear), // very hard

    ("ad9b2d3d-30fb-49a8-a688-724ec2dd3c1d", Category::Boar), // easy
    ("f0e7a583-81bc-4efe-8723-d5f3a602420d", Category::Boar), // hard
    ("9347bbe9-23eb-4f2a-90ab-f9620a2d8665", Category::Boar), // normal
    ("037681cb-0f6a-4431-bd1d-a62f629bad73", Category::Boar), // very hard

    ("b4849983-c710-48e9-9d47-93f65369640b", Category::Deer), // easy
    ("6b4c3a15-9875-467e-83da-c9dc121fae87", Category::Deer), // hard
    ("1b89ffdd-78ca-4dc0-bbd4-cd81cda57fe1", Category::Deer), // normal
    ("9f9d0ef7-becd-4ddd-b219-2cc3898d930e", Category::Deer), // very hard

    ("301d292d-b239-45fe-a021-83e1a08f1d69", Category::Wolf), // hard
    ("2fb21f39-f10a-43f2-80f2-cde6e225ef6e", Category::Wolf), // hard, roaming
    ("43c882e6-a835-4a85-a028-186c8a53e855", Category::Wolf), // normal
    ("ef151ac7-4e23-4687-95a5-bb9cd76eb28a", Category::Wolf), // very hard
    ("c8ec56cb-e421-4d59-90cd-513dfe95d1a2", Category::Wolf), // very hard, roaming
];

#[rustfmt::skip]
const RAIDER_UUIDS: &[(&str, RaiderType)] = &[
    ("7b8e2ab8-2511-4b09-b2a3-7d020d200654", RaiderType::Thief),
    ("f7eb7176-4b2d-450b-b991-aa4854de3b70", RaiderType::Brawler),       // male
    ("e2f3921a-a92c-4eef-9b80-1d4990d53d96", RaiderType::Brawler),       // female
    ("d46bd838-4635-4248-917b-a8bb8df8bbc2", RaiderType::Warrior),       // male
    ("8937422c-1758-4903-8760-8a559515dfa7", RaiderType::Warrior),       // female
    ("1c6eff9d-3d70-4758-8688-b0184883c41a", RaiderType::Shieldbearer),  // elite
    ("2c5eff88-1435-43a7-9542-5cbbe7e223eb", RaiderType::Warmaster),     // champion

    ("93fc8b22-7dcf-4103-a5b8-7fe0d86fd46b", RaiderType::Arbalest),
    ("96238dda-f6f4-4c5e-b8fb-923332194bcd", RaiderType::Champion),
    ("ba493164-2dc4-45f6-9560-5d35e7c4e4bf", RaiderType::Footman),
    ("83a57f3d-37d5-45f0-9b20-ad55603a27ac", RaiderType::HeavyInfantry),
];

pub fn animal_species_from_uuid(uuid: &[u8]) -> Category {
    ANIMAL_SPAWN_UUIDS
        .iter()
        .find(|(raw, _)| raw.as_bytes() == uuid)
        .map(|(_, species)| *species)
        .unwrap_or(Category::Unknown)
}

pub fn raider_type_from_uuid(uuid: &[u8]) -> RaiderType {
    RAIDER_UUIDS
        .iter()
        .find(|(raw, _)| raw.as_bytes() == uuid)
        .map(|(_, kind)| *kind)
        .unwrap_or(RaiderType::Unknown)
}

pub const MINERAL_CODE_IRON: u32 = 0;
pub const MINERAL_CODE_GOLD: u32 = 1;
pub const MINERAL_CODE_COAL: u32 = 2;

pub fn mineral_type_from_code(code: u32) -> MineralType {
    match code {
        MINERAL_CODE_IRON => MineralType::Iron,
        MINERAL_CODE_GOLD => MineralType::Gold,
        MINERAL_CODE_COAL => MineralType::Coal,
        _ => MineralType::Unknown,
    }
}

/// Sub-type code written for metal deposits; `None` for clay, sand and unknown.
pub fn mineral_code(mineral: MineralType) -> Option<u32> {
    match mineral {
        MineralType::Iron => Some(MINERAL_CODE_IRON),
        MineralType::Gold => Some(MINERAL_CODE_GOLD),
        MineralType::Coal => Some(MINERAL_CODE_COAL),
        MineralType::Clay | MineralType::Sand | MineralType::Unknown => None,
    }
}
