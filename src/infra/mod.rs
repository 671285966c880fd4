//! Infrastructure layer - backend adapter implementations

pub mod cached;
pub mod file;
pub mod memory;

pub use cached::CachedStore;
pub use file::FileSource;
pub use memory::{
    MemoryConfigStore, MemoryResourceStore, MemorySearchLog, MemorySource,
};
