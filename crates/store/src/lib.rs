//! `shopsphere-store` - the record-store collaborator contract.
//!
//! The remote store itself is out of scope; this crate pins down the narrow
//! interface the core relies on (five verbs per collection, all fallible,
//! all async) plus an in-memory implementation for tests and development.

pub mod contract;
pub mod in_memory;
pub mod read_state;

pub use contract::{
    NewUser, OrderStore, ProductStore, StoreError, StoreResult, UserRecord, UserStore,
};
pub use in_memory::InMemoryRecordStore;
pub use read_state::{InMemoryReadStateStore, ReadStateStore};
