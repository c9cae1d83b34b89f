//! Database Module
//!
//! Employee records live in an embedded redb database. Services only see the
//! [`RecordStore`] trait.

pub mod seed;
pub mod store;

pub use seed::seed_if_empty;
pub use store::{
    RecordStore, RedbRecordStore, StoreError, StoreResult, Versioned, WriteExpectation,
};
