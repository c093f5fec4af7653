pub mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore, load_comments, save_comments};
