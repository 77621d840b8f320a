//! Single entry point over flatten + shape

use crate::flatten::flatten;
use crate::shape::{shape, AllowList, OutputKind, Transformed};
use crate::tokens::TokenTree;

/// Transform raw token data into a theme.json fragment.
///
/// `data` is `None` when the caller has no token data at all; the result is
/// then [`Transformed::Absent`] (serialized as `false`).
pub fn transform(kind: OutputKind, data: Option<&TokenTree>, allow: &AllowList) -> Transformed {
    let flat = data.map(flatten);
    shape(kind, flat.as_ref(), allow)
}
