//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the core to external systems:
//! - `http` - Portal backend REST client (reqwest)
//! - `memory` - In-memory course, enrollment and lesson fakes
//! - `storage` - Persisted session storage (file, in-memory)

pub mod http;
pub mod memory;
pub mod storage;
