pub mod file;
pub mod memory;
pub mod mood_repository;
pub mod traits;

// Re-export
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use mood_repository::{MoodRepository, STORAGE_KEY};
pub use traits::KeyValueStore;
