pub mod app;
pub mod codec;
pub mod daily;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod quote;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use daily::Dashboard;
pub use state::AppState;
pub use storage::{FileStore, KvStore, MemoryStore, resolve_data_path};
