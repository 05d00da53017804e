//! Copy-and-patch pipeline. Every record is streamed from the source to the
//! destination; records nobody asked to change are written back with their
//! original header and bytes, the rest are patched and re-framed.

mod fog;
mod metadata;
mod minerals;

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::core_api::{CoreError, CoreErrorCode};
use crate::index::RecordHeader;
use crate::reader::LittleEndianReader;
use crate::types::{MineralData, MineralType};

pub use fog::{FOW_GRID_OFFSET, FOW_GRID_SIDE, clear_fog};
pub use metadata::patch_metadata;
pub use minerals::patch_minerals;

/// What to do with the pacifist byte of the metadata record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacifistPolicy {
    Off,
    #[default]
    Keep,
    On,
}

impl PacifistPolicy {
    pub fn apply(&self, current: u8) -> u8 {
        match *self {
            Self::Off => 0,
            Self::Keep => current,
            Self::On => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOptions {
    pub remove_fow: bool,
    pub remove_building_sites: bool,
    pub double_minerals: bool,
    /// New settlement name; `None` or empty keeps the current one.
    pub name: Option<String>,
    pub pacifist: PacifistPolicy,
}

impl ChangeOptions {
    pub fn rename(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn touches_metadata(&self) -> bool {
        self.rename().is_some() || self.pacifist != PacifistPolicy::Keep
    }

    pub fn touches_minerals(&self, new_minerals: &[MineralData]) -> bool {
        self.double_minerals || !new_minerals.is_empty()
    }

    pub fn validate(&self, new_minerals: &[MineralData]) -> io::Result<()> {
        let name_len = self.rename().map_or(0, str::len);
        if name_len > usize::from(u8::MAX) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("name is {name_len} bytes, at most 255 fit"),
            ));
        }
        if new_minerals
            .iter()
            .any(|m| m.mineral_type == MineralType::Unknown)
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot insert a mineral of unknown type",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    pub records_read: usize,
    pub records_written: usize,
    pub records_patched: usize,
    pub records_dropped: usize,
    pub bytes_written: u64,
}

enum Action {
    Verbatim,
    Patched,
    Dropped,
}

#[derive(Debug, Clone, Default)]
pub struct SaveChanger {
    options: ChangeOptions,
}

impl SaveChanger {
    pub fn new(options: ChangeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChangeOptions {
        &self.options
    }

    /// Writes an edited copy of `from` to `to`. The copy is assembled in a
    /// sibling temporary file and only renamed over `to` once complete.
    pub fn copy(
        &self,
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
        new_minerals: &[MineralData],
    ) -> Result<CopyReport, CoreError> {
        let from = from.as_ref();
        let to = to.as_ref();

        self.options
            .validate(new_minerals)
            .map_err(|e| CoreError::from_io("rejected edit request", e))?;

        let same = resolves_to_same_file(from, to)
            .map_err(|e| CoreError::from_io(format!("cannot open {}", from.display()), e))?;
        if same {
            return Err(CoreError::new(
                CoreErrorCode::SourceDestConflict,
                format!(
                    "source and destination are the same file: {}",
                    from.display()
                ),
            ));
        }

        let source = File::open(from)
            .map_err(|e| CoreError::from_io(format!("cannot open {}", from.display()), e))?;
        let partial = partial_path(to)
            .map_err(|e| CoreError::from_io(format!("cannot write {}", to.display()), e))?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&partial)
            .map_err(|e| {
                CoreError::from_io(format!("cannot create {}", partial.display()), e)
            })?;

        let report = match self.write_partial(source, file, new_minerals) {
            Ok(report) => report,
            Err(e) => {
                let _ = fs::remove_file(&partial);
                return Err(CoreError::from_io(
                    format!("failed to copy {} to {}", from.display(), to.display()),
                    e,
                ));
            }
        };

        if let Err(e) = fs::rename(&partial, to) {
            let _ = fs::remove_file(&partial);
            return Err(CoreError::from_io(
                format!("cannot write {}", to.display()),
                e,
            ));
        }

        info!(
            "wrote {} ({} records, {} patched, {} dropped)",
            to.display(),
            report.records_written,
            report.records_patched,
            report.records_dropped
        );
        Ok(report)
    }

    fn write_partial(
        &self,
        source: File,
        partial: File,
        new_minerals: &[MineralData],
    ) -> io::Result<CopyReport> {
        let mut out = BufWriter::new(partial);
        let report = self.stream(BufReader::new(source), &mut out, new_minerals)?;
        out.flush()?;
        out.get_ref().sync_all()?;
        Ok(report)
    }

    /// Streams every record of `reader` into `out`, applying the options.
    pub fn stream<R: Read + Seek, W: Write>(
        &self,
        reader: R,
        out: &mut W,
        new_minerals: &[MineralData],
    ) -> io::Result<CopyReport> {
        self.options.validate(new_minerals)?;

        let mut r = LittleEndianReader::new(reader);
        let mut report = CopyReport::default();
        let mut frame = Vec::new();
        let mut minerals_seen = false;

        loop {
            let start = r.position()?;
            let Some(header) = RecordHeader::read(&mut r)? else {
                break;
            };
            let mut body = r.read_bytes(header.body_len() as usize).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!(
                        "record at offset {start} ({}) declares {} payload bytes: {e}",
                        header.category(),
                        header.body_len()
                    ),
                )
            })?;
            report.records_read += 1;

            let category = header.category();
            minerals_seen |= category == Category::MineralManager;
            let action = match category {
                Category::FoWSystem if self.options.remove_fow => {
                    clear_fog(&mut body)?;
                    Action::Patched
                }
                Category::BuildingBuildSite if self.options.remove_building_sites => {
                    Action::Dropped
                }
                Category::MetaData if self.options.touches_metadata() => {
                    body = patch_metadata(&body, self.options.rename(), self.options.pacifist)?;
                    Action::Patched
                }
                Category::MineralManager if self.options.touches_minerals(new_minerals) => {
                    body = patch_minerals(&body, self.options.double_minerals, new_minerals)?;
                    Action::Patched
                }
                _ => Action::Verbatim,
            };

            match action {
                Action::Dropped => {
                    debug!("dropping {category} record at {start}");
                    report.records_dropped += 1;
                    continue;
                }
                Action::Patched => {
                    debug!(
                        "patched {category} record at {start}: {} -> {} payload bytes",
                        header.body_len(),
                        body.len()
                    );
                    report.records_patched += 1;
                }
                Action::Verbatim => {}
            }

            frame.clear();
            header.emit_to_vec(body.len(), &mut frame)?;
            out.write_all(&frame)?;
            out.write_all(&body)?;
            report.records_written += 1;
            report.bytes_written += (frame.len() + body.len()) as u64;
        }

        if !minerals_seen {
            if !new_minerals.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "save has no {} record to add {} minerals to",
                        Category::MineralManager,
                        new_minerals.len()
                    ),
                ));
            }
            if self.options.double_minerals {
                warn!("save has no {} record, nothing to double", Category::MineralManager);
            }
        }

        Ok(report)
    }
}

fn resolves_to_same_file(from: &Path, to: &Path) -> io::Result<bool> {
    let from = fs::canonicalize(from)?;
    let to = match fs::canonicalize(to) {
        Ok(path) => path,
        Err(_) => match (to.parent(), to.file_name()) {
            (Some(parent), Some(name)) => {
                let parent = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                match fs::canonicalize(parent) {
                    Ok(parent) => parent.join(name),
                    Err(_) => to.to_path_buf(),
                }
            }
            _ => to.to_path_buf(),
        },
    };
    Ok(from == to)
}

/// Sibling of `to` named `<name>.<pid>.<nanos>.partial`. It is opened with
/// `create_new`, so an existing file, including the source, is never reused.
fn partial_path(to: &Path) -> io::Result<PathBuf> {
    let name = to.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination has no file name: {}", to.display()),
        )
    })?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let mut partial = name.to_os_string();
    partial.push(format!(".{}.{nanos}.partial", process::id()));
    Ok(to.with_file_name(partial))
}
