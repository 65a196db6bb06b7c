//! Store - Usage record persistence
//!
//! Records are inserted once and never updated; deletion is bulk, by
//! filter. The SQLite backend uses sqlx (embedded, single writer).

mod helpers;
mod memory;
mod sqlite;
mod traits;

#[cfg(test)]
mod tests;

pub use helpers::{default_data_dir, default_db_path};
pub use memory::MemoryUsageStore;
pub use sqlite::SqliteUsageStore;
pub use traits::UsageStore;
