//! Dead tasks engine: task store access, refresh timer and effect execution.
mod engine;
mod http_store;
mod memory_store;
mod refresh_timer;
mod store;
mod types;

pub use engine::{EngineEvents, EngineHandle};
pub use http_store::{HttpTaskStore, StoreSettings};
pub use memory_store::InMemoryTaskStore;
pub use refresh_timer::RefreshTimer;
pub use store::TaskStore;
pub use types::{EngineEvent, StoreError};
