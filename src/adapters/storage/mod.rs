//! Storage Adapters
//!
//! Implementations of the SessionStorage port for the persisted session.
//!
//! ## Available Adapters
//!
//! - **FileSessionStorage** - Stores the session as a JSON file on disk
//! - **InMemorySessionStorage** - Stores the session in memory (testing/development)

mod file_session_storage;
mod in_memory_session_storage;

pub use file_session_storage::FileSessionStorage;
pub use in_memory_session_storage::InMemorySessionStorage;
