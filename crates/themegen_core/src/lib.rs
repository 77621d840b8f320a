//! themegen core
//!
//! Transforms design tokens from a utility-CSS config into theme.json
//! fragments for a block editor.
//!
//! # Overview
//!
//! Tokens flow through three stages:
//! - **Flatten**: nested groups collapse into `-`-joined keys
//!   (`colors.blue.light` -> `colors-blue-light`)
//! - **Shape**: flat tokens become a plain value map or a list of option
//!   records (`{ name, slug, color }` / `{ name, slug, size }`)
//! - **Label**: option names are derived from slugs (`sea-of-blue` -> `Sea of Blue`)
//!
//! Every call is pure. Nothing is cached between calls.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use themegen_core::{transform, AllowList, OutputKind, TokenTree};
//!
//! let colors: TokenTree = serde_json::from_str(r##"{"red": "#f00", "blue": "#00f"}"##)?;
//! let palette = transform(OutputKind::Palette, Some(&colors), &AllowList::all());
//! let json = serde_json::to_string(&palette)?;
//! // [{"name":"Red","slug":"red","color":"#f00"},{"name":"Blue","slug":"blue","color":"#00f"}]
//! ```
//!
//! # Absent data
//!
//! [`transform`] takes `Option<&TokenTree>`. `None` yields
//! [`Transformed::Absent`], which serializes as `false` so a theme.json can
//! tell "no tokens" apart from "no matching tokens".

pub mod flatten;
pub mod label;
pub mod shape;
pub mod tokens;
pub mod transform;

// Re-export commonly used types
pub use flatten::{flatten, FlatTokens, DELIMITER};
pub use label::title_case;
pub use shape::{shape, AllowList, OptionRecord, OutputKind, ParseKindError, Transformed, ValueField};
pub use tokens::*;
pub use transform::transform;
