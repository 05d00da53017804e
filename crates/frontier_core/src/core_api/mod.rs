mod engine;
mod error;
mod save_reader;
mod types;

pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use save_reader::SaveReader;
pub use types::{CategoryCount, DecodedRecord, Summary};
