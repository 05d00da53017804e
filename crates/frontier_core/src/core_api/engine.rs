use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

use crate::category::Category;
use crate::changer::{ChangeOptions, CopyReport, SaveChanger};
use crate::index::{self, CategoryIndex};
use crate::layout::FileLayout;
use crate::types::MineralData;

use super::error::CoreError;
use super::save_reader::SaveReader;
use super::types::{CategoryCount, Summary};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// An indexed save file. Cloning is cheap and every clone can hand out
/// independent readers, including from other threads.
#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    index: Arc<CategoryIndex>,
    layout: Arc<FileLayout>,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Scans the whole file once and indexes every record by category.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Session, CoreError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CoreError::from_io(format!("cannot open {}", path.display()), e))?;
        let scanned = index::scan(BufReader::new(file))
            .map_err(|e| CoreError::from_io(format!("failed to index {}", path.display()), e))?;

        info!(
            "indexed {} records from {} ({} bytes)",
            scanned.index.total(),
            path.display(),
            scanned.layout.file_len
        );

        Ok(Session {
            path: path.to_path_buf(),
            index: Arc::new(scanned.index),
            layout: Arc::new(scanned.layout),
        })
    }

    /// Writes an edited copy of `from` to `to`.
    pub fn copy(
        &self,
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
        options: ChangeOptions,
        new_minerals: &[MineralData],
    ) -> Result<CopyReport, CoreError> {
        SaveChanger::new(options).copy(from, to, new_minerals)
    }
}

impl Session {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn layout(&self) -> &FileLayout {
        &self.layout
    }

    pub fn record_count(&self, category: Category) -> usize {
        self.index.count(category)
    }

    /// Opens a fresh handle on the file for decoding.
    pub fn reader(&self) -> Result<SaveReader, CoreError> {
        SaveReader::open(&self.path, Arc::clone(&self.index))
    }

    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut categories: Vec<Category> = self.index.categories().collect();
        categories.sort();
        categories
            .into_iter()
            .map(|category| CategoryCount {
                category,
                count: self.index.count(category),
            })
            .collect()
    }

    pub fn summary(&self) -> Result<Summary, CoreError> {
        let mut reader = self.reader()?;
        Ok(Summary {
            file_len: self.layout.file_len,
            record_count: self.index.total(),
            categories: self.category_counts(),
            metadata: reader.general_save_data()?,
            camera: reader.camera()?,
            world_size: reader.world_size()?,
        })
    }
}
