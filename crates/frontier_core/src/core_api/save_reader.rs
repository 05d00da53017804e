use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::category::Category;
use crate::decode;
use crate::index::CategoryIndex;
use crate::reader::LittleEndianReader;
use crate::types::{
    AgricultureGrid, AnimalData, AnimalSpawnData, BaseData, ForageableData, GeneralSaveData,
    HeightMap, MineralData, Point, RaiderData,
};

use super::error::CoreError;
use super::types::DecodedRecord;

type PayloadReader = LittleEndianReader<Cursor<Vec<u8>>>;

/// Decodes payloads from one save file. Each reader owns its own file
/// handle and shares the read-only index with the session it came from.
#[derive(Debug)]
pub struct SaveReader {
    path: PathBuf,
    file: File,
    index: Arc<CategoryIndex>,
}

impl SaveReader {
    pub(crate) fn open(path: &Path, index: Arc<CategoryIndex>) -> Result<Self, CoreError> {
        let file = File::open(path)
            .map_err(|e| CoreError::from_io(format!("cannot open {}", path.display()), e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            index,
        })
    }

    /// Reads the payload of one record into memory, bounded by its framed
    /// length so a decoder can never run into the next record.
    fn payload(
        &mut self,
        category: Category,
        occurrence: usize,
    ) -> Result<Option<PayloadReader>, CoreError> {
        let Some(range) = self.index.payload(category, occurrence) else {
            return Ok(None);
        };
        let read = |file: &mut File| -> io::Result<Vec<u8>> {
            file.seek(SeekFrom::Start(range.start))?;
            let mut buf = vec![0u8; range.len() as usize];
            file.read_exact(&mut buf)?;
            Ok(buf)
        };
        let buf = read(&mut self.file).map_err(|e| {
            CoreError::from_io(
                format!(
                    "cannot read {category} #{occurrence} from {}",
                    self.path.display()
                ),
                e,
            )
        })?;
        Ok(Some(LittleEndianReader::new(Cursor::new(buf))))
    }

    fn decode_one<T>(
        &mut self,
        category: Category,
        occurrence: usize,
        decode: impl FnOnce(&mut PayloadReader) -> io::Result<T>,
    ) -> Result<Option<T>, CoreError> {
        let Some(mut r) = self.payload(category, occurrence)? else {
            return Ok(None);
        };
        decode(&mut r).map(Some).map_err(|e| {
            CoreError::from_io(format!("failed to decode {category} #{occurrence}"), e)
        })
    }

    fn decode_all<T>(
        &mut self,
        category: Category,
        mut decode: impl FnMut(&mut PayloadReader) -> io::Result<T>,
    ) -> Result<Vec<T>, CoreError> {
        let count = self.index.count(category);
        let mut out = Vec::with_capacity(count);
        for occurrence in 0..count {
            if let Some(value) = self.decode_one(category, occurrence, &mut decode)? {
                out.push(value);
            }
        }
        Ok(out)
    }

    /// Camera position, or the origin when the save has no camera record.
    pub fn camera(&mut self) -> Result<Point, CoreError> {
        Ok(self
            .decode_one(Category::CameraManager, 0, decode::decode_camera)?
            .unwrap_or_default())
    }

    pub fn minerals(&mut self) -> Result<Vec<MineralData>, CoreError> {
        Ok(self
            .decode_one(Category::MineralManager, 0, decode::decode_minerals)?
            .unwrap_or_default())
    }

    pub fn forageables(&mut self) -> Result<Vec<ForageableData>, CoreError> {
        let per_record = self.decode_all(Category::ForageableResource, decode::decode_forageables)?;
        Ok(per_record.into_iter().flatten().collect())
    }

    /// Raiders first, then battering rams.
    pub fn raiders(&mut self) -> Result<Vec<RaiderData>, CoreError> {
        let mut out = self.decode_all(Category::Raider, decode::decode_raider)?;
        out.extend(self.decode_all(Category::BatteringRam, decode::decode_battering_ram)?);
        Ok(out)
    }

    pub fn enemies(&mut self) -> Result<Vec<BaseData>, CoreError> {
        self.decode_all(Category::Raider, decode::decode_enemy_position)
    }

    /// Positions of every animal, grouped by species in a fixed order.
    pub fn animals(&mut self) -> Result<Vec<BaseData>, CoreError> {
        let mut out = Vec::new();
        for category in Category::ANIMALS {
            out.extend(self.decode_all(category, |r| {
                decode::decode_animal_position(r, category)
            })?);
        }
        Ok(out)
    }

    /// Full deer records including spawn and wander points.
    pub fn animal_details(&mut self) -> Result<Vec<AnimalData>, CoreError> {
        self.decode_all(Category::Deer, decode::decode_animal_detail)
    }

    /// Town centers first, then shelters.
    pub fn houses(&mut self) -> Result<Vec<BaseData>, CoreError> {
        let mut out = Vec::new();
        for category in [Category::TownCenter, Category::Shelter] {
            out.extend(self.decode_all(category, |r| {
                decode::decode_building_position(r, category)
            })?);
        }
        Ok(out)
    }

    pub fn animal_spawns(&mut self) -> Result<Vec<AnimalSpawnData>, CoreError> {
        Ok(self
            .decode_one(Category::AnimalManager, 0, decode::decode_animal_spawns)?
            .unwrap_or_default())
    }

    pub fn general_save_data(&mut self) -> Result<GeneralSaveData, CoreError> {
        Ok(self
            .decode_one(Category::MetaData, 0, decode::decode_metadata)?
            .unwrap_or_default())
    }

    pub fn agriculture_data(&mut self) -> Result<AgricultureGrid, CoreError> {
        Ok(self
            .decode_one(Category::AgricultureManager, 0, decode::decode_agriculture)?
            .unwrap_or_default())
    }

    pub fn height_map(&mut self) -> Result<HeightMap, CoreError> {
        Ok(self
            .decode_one(Category::TerrainManager, 0, decode::decode_height_map)?
            .unwrap_or_default())
    }

    pub fn world_size(&mut self) -> Result<Option<(f32, f32)>, CoreError> {
        self.decode_one(Category::AgricultureManager, 0, decode::decode_world_size)
    }

    /// Decodes one record with the grammar its category calls for.
    pub fn record(
        &mut self,
        category: Category,
        occurrence: usize,
    ) -> Result<Option<DecodedRecord>, CoreError> {
        match category {
            Category::MineralManager => {
                self.decode_one(category, occurrence, |r| {
                    decode::decode_minerals(r).map(DecodedRecord::Minerals)
                })
            }
            Category::ForageableResource => self.decode_one(category, occurrence, |r| {
                decode::decode_forageables(r).map(DecodedRecord::Forageables)
            }),
            Category::Raider => self.decode_one(category, occurrence, |r| {
                decode::decode_raider(r).map(DecodedRecord::Raider)
            }),
            Category::BatteringRam => self.decode_one(category, occurrence, |r| {
                decode::decode_battering_ram(r).map(DecodedRecord::Raider)
            }),
            Category::Deer => self.decode_one(category, occurrence, |r| {
                decode::decode_animal_detail(r).map(DecodedRecord::Animal)
            }),
            Category::Bear | Category::Boar | Category::Wolf | Category::WolfDen => {
                self.decode_one(category, occurrence, |r| {
                    decode::decode_animal_position(r, category).map(DecodedRecord::AnimalPosition)
                })
            }
            Category::AnimalManager => self.decode_one(category, occurrence, |r| {
                decode::decode_animal_spawns(r).map(DecodedRecord::AnimalSpawns)
            }),
            Category::TownCenter | Category::Shelter => {
                self.decode_one(category, occurrence, |r| {
                    decode::decode_building_position(r, category).map(DecodedRecord::Building)
                })
            }
            Category::CameraManager => self.decode_one(category, occurrence, |r| {
                decode::decode_camera(r).map(DecodedRecord::Camera)
            }),
            Category::MetaData => self.decode_one(category, occurrence, |r| {
                decode::decode_metadata(r).map(DecodedRecord::Metadata)
            }),
            Category::AgricultureManager => self.decode_one(category, occurrence, |r| {
                decode::decode_agriculture(r).map(DecodedRecord::Agriculture)
            }),
            Category::TerrainManager => self.decode_one(category, occurrence, |r| {
                decode::decode_height_map(r).map(DecodedRecord::HeightMap)
            }),
            Category::FoWSystem
            | Category::BuildingBuildSite
            | Category::BuildingBuildSiteGuids
            | Category::Unknown => Ok(self
                .index
                .payload(category, occurrence)
                .map(|range| DecodedRecord::Opaque {
                    category,
                    payload_len: range.len(),
                })),
        }
    }
}
