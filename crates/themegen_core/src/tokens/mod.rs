//! Design token data model
//!
//! Tokens arrive as nested, already-deserialized data:
//! - Leaf values (strings, numbers, booleans, null)
//! - Lists, which are always leaves
//! - Groups of named children, kept in source order

mod tree;
mod value;

pub use tree::*;
pub use value::*;
