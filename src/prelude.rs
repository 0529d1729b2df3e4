//! Prelude module for sql_udf crate.
//!
//! Re-exports the derive macro from derive_more used across the crate.

#[allow(unused_imports)]
pub use derive_more::Display;
