//! Enumeration table shared with the native capture layer.
//!
//! The native layer publishes one table per configuration category,
//! mapping symbolic names (`"fill"`, `"video"`, `"torch"`) to the numeric
//! codes it understands. The table is built once at startup and shared
//! read-only between every view through an `Arc`.

mod table;

pub use table::{Category, CodeTable, Constants};
