// Adapters layer: concrete implementations for external systems (filesystem, sample sheets).

pub mod samples_csv;
pub mod storage;

pub use storage::LocalStorage;
