//! Core types and traversal for structural namespace flattening
//!
//! This crate turns an arbitrarily nested value (key-value mappings, ordered
//! sequences and field-tagged records, composed in any order) into a flat set
//! of slash-delimited paths, one per leaf.
//!
//! # Entry points
//!
//! - [`from_mapping`]: a native `BTreeMap`/`HashMap` keyed by strings
//! - [`from_json`] / [`from_serialized`]: interchange-format bytes
//! - [`from_record`] / [`from_record_tags`]: a type registered with [`record!`]
//!
//! All of them normalize their input into a [`GenericValue`] and hand it to
//! the same traversal core ([`traverse`] / [`Flattener`]).
//!
//! # Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! let mut config = BTreeMap::new();
//! config.insert("Foo", vec!["foo_0", "foo_1"]);
//! config.insert("Bar", vec!["bar_0"]);
//!
//! let mut ns: Vec<String> = Vec::new();
//! nspath_core::from_mapping(&config, "root", &mut ns);
//!
//! assert_eq!(ns, ["root/Bar/0", "root/Foo/0", "root/Foo/1"]);
//! ```
//!
//! For circuit-style or embedded environments the crate builds without std:
//! ```toml
//! [dependencies]
//! nspath-core = { version = "0.1", default-features = false }
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// Module declarations
pub mod adapters;
pub mod error;
pub mod traits;
pub mod traverse;
pub mod value;

// Re-export all public types and traits for convenience
pub use adapters::{
    from_json, from_mapping, from_record, from_record_tags, from_serialized, Format,
};
pub use error::NamespaceError;
pub use traits::{Field, Record, ToGeneric, Visibility};
pub use traverse::{split_path, traverse, traverse_with, Flattener, NamingPolicy, SEPARATOR};
pub use value::{GenericValue, RecordField, RecordValue, Terminal};
