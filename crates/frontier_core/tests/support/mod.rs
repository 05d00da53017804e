//! Synthetic save files in the exact wire format, shared by the integration
//! tests of the core and CLI crates.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use frontier_core::category::Category;
use frontier_core::types::Point;

pub const UNKNOWN_CATEGORY_ID: u32 = 0x0BAD_F00D;
pub const FOW_PAYLOAD_LEN: usize = 4 + 4 * 512 * 512;

pub const DEER_SPAWN_UUID: &str = "1b89ffdd-78ca-4dc0-bbd4-cd81cda57fe1";
pub const WOLF_SPAWN_UUID: &str = "43c882e6-a835-4a85-a028-186c8a53e855";
pub const THIEF_UUID: &str = "7b8e2ab8-2511-4b09-b2a3-7d020d200654";
pub const CHAMPION_UUID: &str = "96238dda-f6f4-4c5e-b8fb-923332194bcd";

pub fn temp_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{}_{}.sav", std::process::id(), nanos))
}

/// Concatenates framed records.
#[derive(Debug, Default)]
pub struct SaveBuilder {
    bytes: Vec<u8>,
    categories: Vec<Category>,
}

impl SaveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_record(mut self, category_id: u32, body: &[u8]) -> Self {
        let category = Category::from_id(category_id);
        let kind_name = match category {
            Category::Unknown => "Mystery",
            known => known.as_str(),
        };
        self.bytes
            .extend_from_slice(&frame(0x02, kind_name, category_id, body));
        self.categories.push(category);
        self
    }

    pub fn record(self, category: Category, body: &[u8]) -> Self {
        let id = category.id().expect("category without an id");
        self.raw_record(id, body)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write_temp(self, prefix: &str) -> PathBuf {
        let path = temp_path(prefix);
        fs::write(&path, self.build()).expect("failed to write synthetic save");
        path
    }
}

pub fn frame(kind_tag: u8, kind_name: &str, category_id: u32, body: &[u8]) -> Vec<u8> {
    let mut out = vec![kind_tag, kind_name.len() as u8];
    out.extend_from_slice(kind_name.as_bytes());
    out.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    out.extend_from_slice(&category_id.to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// Little-endian payload writer.
#[derive(Debug, Default)]
pub struct Payload(pub Vec<u8>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pad(mut self, n: usize) -> Self {
        self.0.extend(std::iter::repeat_n(0x5A, n));
        self
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn point(self, p: Point) -> Self {
        self.f32(p.x).f32(p.y).f32(p.z)
    }

    pub fn short(mut self, s: &str) -> Self {
        self.0.push(s.len() as u8);
        self.0.extend_from_slice(s.as_bytes());
        self
    }

    pub fn bytes(mut self, b: &[u8]) -> Self {
        self.0.extend_from_slice(b);
        self
    }

    pub fn done(self) -> Vec<u8> {
        self.0
    }
}

pub fn camera(p: Point) -> Vec<u8> {
    Payload::new().pad(1).point(p).pad(8).done()
}

pub fn building(p: Point) -> Vec<u8> {
    Payload::new().pad(7).point(p).pad(12).done()
}

/// FoW payload with every cell byte set to a recognisable pattern.
pub fn fog() -> Vec<u8> {
    let mut body = vec![0u8; FOW_PAYLOAD_LEN + 6];
    for (i, b) in body.iter_mut().enumerate() {
        *b = (i % 7) as u8;
    }
    body
}

pub struct Metadata<'a> {
    pub version: &'a str,
    pub seed: &'a str,
    pub settings: [u8; 4],
    pub pacifist: u8,
    pub name: &'a str,
}

impl Default for Metadata<'_> {
    fn default() -> Self {
        Self {
            version: "0.9.8",
            seed: "ABCD1234",
            settings: [1, 2, 3, 4],
            pacifist: 0,
            name: "Stonebrook",
        }
    }
}

impl Metadata<'_> {
    pub fn encode(&self) -> Vec<u8> {
        Payload::new()
            .bytes(&[0x10, 0x11, 0x12, 0x13, 0x14])
            .short(self.version)
            .short(self.seed)
            .bytes(&self.settings)
            .u8(self.pacifist)
            .short(self.name)
            .u32(42) // villagers
            .u32(7) // years
            .u32(5)
            .u32(6)
            .u32(1_700_000_000)
            .u32(3) // hours
            .u32(45) // mins
            .u32(3)
            .bytes(&[0xAB, 0xAB, 0xAB])
            .bytes(&[0xCD, 0xEF])
            .done()
    }
}

pub struct Minerals {
    pub clay: Vec<(Point, f32, u32)>,
    pub sand: Vec<(Point, f32, u32)>,
    /// `(sub id, type code, position, radius, amount)`
    pub metals: Vec<(u32, u32, Point, f32, u32)>,
    pub table: u32,
    pub lookup: u32,
    pub tail: Vec<u8>,
}

impl Default for Minerals {
    fn default() -> Self {
        Self {
            clay: vec![(Point::new(10.0, 1.0, 20.0), 5.0, 300)],
            sand: vec![
                (Point::new(30.0, 2.0, 40.0), 6.0, 400),
                (Point::new(50.0, 3.0, 60.0), 7.0, 500),
            ],
            metals: vec![
                (1, 0, Point::new(70.0, 4.0, 80.0), 8.0, 600),
                (2, 2, Point::new(90.0, 5.0, 100.0), 9.0, 700),
            ],
            table: 2,
            lookup: 2,
            tail: vec![0x77, 0x66, 0x55],
        }
    }
}

impl Minerals {
    pub fn encode(&self) -> Vec<u8> {
        let mut p = Payload::new().u8(0x01);
        for list in [&self.clay, &self.sand] {
            p = p.u32(list.len() as u32);
            for &(pos, radius, amount) in list.iter() {
                p = p.point(pos).f32(radius).u32(amount);
            }
        }
        p = p.u32(self.metals.len() as u32);
        for &(sub_id, code, pos, radius, amount) in &self.metals {
            p = p.u32(sub_id).u32(code).point(pos).f32(radius).u32(amount);
        }
        p = p.u32(self.table);
        for i in 0..self.table {
            p = p.bytes(&[i as u8 + 0xA0; 32]);
        }
        p = p.u8(0xEE).u32(self.lookup);
        for i in 0..self.lookup {
            p = p.bytes(&[i as u8 + 0xB0; 20]);
        }
        p.bytes(&self.tail).done()
    }
}

fn unit_prefix(p: Payload, position: Point, name: &str, hp: f32) -> Payload {
    p.pad(6).point(position).pad(28).short(name).f32(hp).pad(1)
}

fn item_stacks(p: Payload, items: &[(&str, u32)]) -> Payload {
    let mut p = p.u32(items.len() as u32);
    for &(name, count) in items {
        p = p.short(name).pad(417).u32(count);
    }
    p
}

pub fn raider(position: Point, spawn: Point, hp: f32, p1: f32, p2: f32, uuid: &str) -> Vec<u8> {
    let p = unit_prefix(Payload::new(), position, "Raider", hp)
        .point(spawn)
        .pad(1);
    let p = item_stacks(p, &[("ItemBread", 2)]).f32(p1).pad(1);
    item_stacks(p, &[("ItemWeapon", 1), ("ItemShield", 1)])
        .pad(4)
        .f32(p2)
        .short(uuid)
        .pad(9)
        .done()
}

pub fn battering_ram(position: Point, spawn: Point, hp: f32) -> Vec<u8> {
    unit_prefix(Payload::new(), position, "BatteringRam", hp)
        .point(spawn)
        .pad(1)
        .pad(5)
        .done()
}

pub fn deer(position: Point, hp: f32, spawn: &[Point], wander: &[Point], area: u32) -> Vec<u8> {
    let mut p = unit_prefix(Payload::new(), position, "Deer", hp)
        .short(DEER_SPAWN_UUID)
        .pad(2)
        .u32(spawn.len() as u32);
    for &pt in spawn {
        p = p.point(pt);
    }
    p = p.pad(1).u32(wander.len() as u32);
    for &pt in wander {
        p = p.point(pt);
    }
    p.pad(1).u32(area).pad(3).done()
}

/// Payload that only needs the shared `6 bytes, Point` prefix.
pub fn animal(position: Point) -> Vec<u8> {
    unit_prefix(Payload::new(), position, "Animal", 50.0)
        .pad(16)
        .done()
}

pub fn animal_manager(areas: &[(u32, &str)]) -> Vec<u8> {
    // One herd with two workers and a center, one without a center.
    let mut p = Payload::new()
        .pad(2)
        .u32(2)
        .pad(1)
        .u32(2)
        .pad(8)
        .short("Herd A")
        .pad(15)
        .u8(1)
        .pad(4)
        .pad(53)
        .pad(1)
        .u32(0)
        .short("Herd B")
        .pad(15)
        .u8(0)
        .pad(53)
        .u32(areas.len() as u32);
    for &(area, uuid) in areas {
        p = p.u32(area).short(uuid);
    }
    p.done()
}

pub fn forageable(position: Point, kind: &str, yields: &[(&str, u32)]) -> Vec<u8> {
    let p = Payload::new()
        .pad(5)
        .u8(2)
        .pad(1 + 2 * 4)
        .point(position)
        .pad(28)
        .short(kind)
        .pad(1);
    let mut p = item_stacks(p, &[("ItemBerries", 3)]).pad(31).u32(yields.len() as u32);
    for &(item, amount) in yields {
        p = p.short(item).u32(amount);
    }
    p.done()
}

/// Agriculture payload whose cell `(x, y, layer)` holds `x*100 + y*10 + layer`.
pub fn agriculture(world: (f32, f32), width: u32, height: u32) -> Vec<u8> {
    let mut p = Payload::new()
        .pad(6)
        .f32(world.0)
        .f32(world.1)
        .u32(width)
        .u32(height);
    for x in 0..width {
        for y in 0..height {
            for layer in 0..9 {
                p = p.f32((x * 100 + y * 10 + layer) as f32);
            }
        }
    }
    p.done()
}

/// Terrain payload with one entry in every skipped array and sample
/// `(i, j)` equal to `i*size + j`.
pub fn terrain(size: u32, total: u32) -> Vec<u8> {
    let mut p = Payload::new().pad(1);
    for stride in [96, 100, 12, 122] {
        p = p.u32(1).pad(stride);
    }
    p = p.u32(1).pad(24).u32(2).pad(2 * 16).pad(2);
    p = p.u32(1).pad(81);
    p = p.u32(size).u32(total);
    for i in 0..size {
        for j in 0..size {
            p = p.f32((i * size + j) as f32);
        }
    }
    p.done()
}

/// A save with at least one record of every known category plus one
/// unknown record.
pub fn full_save() -> SaveBuilder {
    SaveBuilder::new()
        .record(Category::MetaData, &Metadata::default().encode())
        .record(Category::CameraManager, &camera(Point::new(1.5, 2.5, 3.5)))
        .record(Category::FoWSystem, &fog())
        .record(Category::MineralManager, &Minerals::default().encode())
        .record(
            Category::Raider,
            &raider(
                Point::new(11.0, 0.0, 12.0),
                Point::new(13.0, 0.0, 14.0),
                80.0,
                250.0,
                1.25,
                THIEF_UUID,
            ),
        )
        .record(
            Category::BatteringRam,
            &battering_ram(Point::new(21.0, 0.0, 22.0), Point::new(23.0, 0.0, 24.0), 900.0),
        )
        .record(
            Category::Deer,
            &deer(
                Point::new(31.0, 1.0, 32.0),
                40.0,
                &[Point::new(1.0, 0.0, 1.0), Point::new(2.0, 0.0, 2.0)],
                &[Point::new(3.0, 0.0, 3.0)],
                9,
            ),
        )
        .record(Category::Wolf, &animal(Point::new(41.0, 1.0, 42.0)))
        .record(
            Category::AnimalManager,
            &animal_manager(&[(9, DEER_SPAWN_UUID), (4, WOLF_SPAWN_UUID)]),
        )
        .record(Category::TownCenter, &building(Point::new(51.0, 2.0, 52.0)))
        .record(Category::BuildingBuildSite, &[0x42; 12])
        .record(Category::Shelter, &building(Point::new(61.0, 2.0, 62.0)))
        .record(
            Category::ForageableResource,
            &forageable(
                Point::new(71.0, 0.5, 72.0),
                "BerriesResource",
                &[("ItemBerries", 12), ("ItemHerbs", 3)],
            ),
        )
        .record(Category::BuildingBuildSite, &[0x43; 20])
        .record(Category::BuildingBuildSiteGuids, &[0x44; 8])
        .record(Category::AgricultureManager, &agriculture((1024.0, 768.0), 3, 2))
        .record(Category::TerrainManager, &terrain(4, 16))
        .raw_record(UNKNOWN_CATEGORY_ID, &[0x99; 17])
}
