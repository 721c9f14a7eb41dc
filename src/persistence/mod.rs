pub mod document;
pub mod files;
pub mod migration;

pub use document::{KeyValueDocument, KeyValueStore, TaskDocument};
pub use files::{ensure_dir, get_data_dir, init_local_data_dir};

#[cfg(test)]
pub use document::MemoryDocument;
