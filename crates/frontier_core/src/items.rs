//! Item identifiers as they appear in forageable yield lists and unit
//! inventories. On disk every item is the string `Item<Name>`; anything not
//! in the table decodes as `GameItem::Unknown`.

use std::fmt;

use serde::{Deserialize, Serialize};

const ITEM_PREFIX: &str = "Item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameItem {
    Logs,
    Berries,
    Stone,
    Planks,
    Bread,
    Clover,
    Firewood,
    Flour,
    Hide,
    HideCoat,
    Meat,
    RootVegetable,
    Beans,
    Greens,
    Grain,
    Mushroom,
    Roots,
    Nuts,
    Fruit,
    PreservedVeg,
    Preserves,
    Herbs,
    Eggs,
    IronOre,
    Iron,
    Tool,
    HeavyTool,
    Weapon,
    SimpleWeapon,
    HeavyWeapon,
    Shield,
    Hauberk,
    Platemail,
    Arrow,
    Brick,
    Bow,
    Crossbow,
    Fish,
    Shoes,
    Carcass,
    SmokedMeat,
    SmokedFish,
    Flax,
    LinenClothes,
    Coal,
    Clay,
    Water,
    GoldOre,
    GoldIngot,
    Pottery,
    WheatBeer,
    Honey,
    Basket,
    Willow,
    HealthyCarcass,
    UnhealthyCarcass,
    SicklyCarcass,
    Furniture,
    Tallow,
    Wax,
    Soap,
    Candle,
    Spice,
    Poop,
    Compost,
    DeceasedVillager,
    Milk,
    Cheese,
    Cow,
    LivestockToMilk,
    Sand,
    Glass,
    Barrel,
    Medicine,
    AnimalTrap,
    SmallCarcass,
    BoarCarcass,
    Unknown,
}

#[rustfmt::skip]
const ITEM_NAMES: &[(&str, GameItem)] = &[
    ("Logs",             GameItem::Logs),
    ("Berries",          GameItem::Berries),
    ("Stone",            GameItem::Stone),
    ("Planks",           GameItem::Planks),
    ("Bread",            GameItem::Bread),
    ("Clover",           GameItem::Clover),
    ("Firewood",         GameItem::Firewood),
    ("Flour",            GameItem::Flour),
    ("Hide",             GameItem::Hide),
    ("HideCoat",         GameItem::HideCoat),
    ("Meat",             GameItem::Meat),
    ("RootVegetable",    GameItem::RootVegetable),
    ("Beans",            GameItem::Beans),
    ("Greens",           GameItem::Greens),
    ("Grain",            GameItem::Grain),
    ("Mushroom",         GameItem::Mushroom),
    ("Roots",            GameItem::Roots),
    ("Nuts",             GameItem::Nuts),
    ("Fruit",            GameItem::Fruit),
    ("PreservedVeg",     GameItem::PreservedVeg),
    ("Preserves",        GameItem::Preserves),
    ("Herbs",            GameItem::Herbs),
    ("Eggs",             GameItem::Eggs),
    ("IronOre",          GameItem::IronOre),
    ("Iron",             GameItem::Iron),
    ("Tool",             GameItem::Tool),
    ("HeavyTool",        GameItem::HeavyTool),
    ("Weapon",           GameItem::Weapon),
    ("SimpleWeapon",     GameItem::SimpleWeapon),
    ("HeavyWeapon",      GameItem::HeavyWeapon),
    ("Shield",           GameItem::Shield),
    ("Hauberk",          GameItem::Hauberk),
    ("Platemail",        GameItem::Platemail),
    ("Arrow",            GameItem::Arrow),
    ("Brick",            GameItem::Brick),
    ("Bow",              GameItem::Bow),
    ("Crossbow",         GameItem::Crossbow),
    ("Fish",             GameItem::Fish),
    ("Shoes",            GameItem::Shoes),
    ("Carcass",          GameItem::Carcass),
    ("SmokedMeat",       GameItem::SmokedMeat),
    ("SmokedFish",       GameItem::SmokedFish),
    ("Flax",             GameItem::Flax),
    ("LinenClothes",     GameItem::LinenClothes),
    ("Coal",             GameItem::Coal),
    ("Clay",             GameItem::Clay),
    ("Water",            GameItem::Water),
    ("GoldOre",          GameItem::GoldOre),
    ("GoldIngot",        GameItem::GoldIngot),
    ("Pottery",          GameItem::Pottery),
    ("WheatBeer",        GameItem::WheatBeer),
    ("Honey",            GameItem::Honey),
    ("Basket",           GameItem::Basket),
    ("Willow",           GameItem::Willow),
    ("HealthyCarcass",   GameItem::HealthyCarcass),
    ("UnhealthyCarcass", GameItem::UnhealthyCarcass),
    ("SicklyCarcass",    GameItem::SicklyCarcass),
    ("Furniture",        GameItem::Furniture),
    ("Tallow",           GameItem::Tallow),
    ("Wax",              GameItem::Wax),
    ("Soap",             GameItem::Soap),
    ("Candle",           GameItem::Candle),
    ("Spice",            GameItem::Spice),
    ("Poop",             GameItem::Poop),
    ("Compost",          GameItem::Compost),
    ("DeceasedVillager", GameItem::DeceasedVillager),
    ("Milk",             GameItem::Milk),
    ("Cheese",           GameItem::Cheese),
    ("Cow",              GameItem::Cow),
    ("LivestockToMilk",  GameItem::LivestockToMilk),
    ("Sand",             GameItem::Sand),
    ("Glass",            GameItem::Glass),
    ("Barrel",           GameItem::Barrel),
    ("Medicine",         GameItem::Medicine),
    ("AnimalTrap",       GameItem::AnimalTrap),
    ("SmallCarcass",     GameItem::SmallCarcass),
    ("BoarCarcass",      GameItem::BoarCarcass),
];

impl GameItem {
    /// Map an on-disk item string such as `ItemHerbs`.
    pub fn from_item_name(raw: &[u8]) -> Self {
        let Some(name) = raw.strip_prefix(ITEM_PREFIX.as_bytes()) else {
            return Self::Unknown;
        };
        ITEM_NAMES
            .iter()
            .find(|(known, _)| known.as_bytes() == name)
            .map(|(_, item)| *item)
            .unwrap_or(Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        ITEM_NAMES
            .iter()
            .find(|(_, item)| item == self)
            .map(|(name, _)| *name)
            .unwrap_or("Unknown")
    }

    pub fn item_name(&self) -> Option<String> {
        match self {
            Self::Unknown => None,
            known => Some(format!("{ITEM_PREFIX}{}", known.as_str())),
        }
    }
}

impl fmt::Display for GameItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_prefixed_names() {
        assert_eq!(GameItem::from_item_name(b"ItemHerbs"), GameItem::Herbs);
        assert_eq!(GameItem::from_item_name(b"ItemWillow"), GameItem::Willow);
        assert_eq!(GameItem::from_item_name(b"ItemBoarCarcass"), GameItem::BoarCarcass);
    }

    #[test]
    fn unmatched_names_are_unknown() {
        assert_eq!(GameItem::from_item_name(b"Herbs"), GameItem::Unknown);
        assert_eq!(GameItem::from_item_name(b"ItemMushrooms"), GameItem::Unknown);
        assert_eq!(GameItem::from_item_name(b""), GameItem::Unknown);
    }

    #[test]
    fn every_entry_has_its_own_name() {
        for &(name, item) in ITEM_NAMES {
            assert_eq!(item.as_str(), name);
            assert_eq!(item.item_name(), Some(format!("Item{name}")));
        }
        assert_eq!(GameItem::Unknown.item_name(), None);
    }
}
