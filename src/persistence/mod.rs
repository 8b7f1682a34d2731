pub mod files;
pub mod store;

pub use files::{atomic_write, ensure_data_dir, get_data_dir};
pub use store::{
    load_or_default, save_snapshot, FileStore, MemoryStore, StateStore, AUTH_KEY, TASKS_KEY,
    THEME_KEY,
};
