pub mod category;
pub mod changer;
pub mod core_api;
pub mod decode;
pub mod index;
pub mod items;
pub mod layout;
pub mod reader;
pub mod types;
