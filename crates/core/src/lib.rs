//! Domain types, errors and pure helpers shared by the store and the HTTP
//! gateway. No I/O lives here.

pub mod error;
pub mod types;
pub mod versioning;
