//! Shaping flat tokens into theme.json fragments
//!
//! A [`FlatTokens`] map becomes one of:
//! - a plain value map (`"16": "16px"`) for [`OutputKind::Plain`]
//! - a list of option records (`{ name, slug, color }` or `{ name, slug, size }`)
//!   for palettes, font sizes and spacing sizes

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::flatten::FlatTokens;
use crate::label::title_case;

/// Requested output shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Plain `key: value` map
    Plain,
    /// Color palette options (`color` field)
    Palette,
    /// Font size options (`size` field)
    FontSizes,
    /// Spacing size options (`size` field)
    SpacingSizes,
}

impl OutputKind {
    /// Stable identifier used in templates and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Palette => "palette",
            Self::FontSizes => "fontSizes",
            Self::SpacingSizes => "spacingSizes",
        }
    }

    pub fn all() -> &'static [OutputKind] {
        const KINDS: [OutputKind; 4] = [
            OutputKind::Plain,
            OutputKind::Palette,
            OutputKind::FontSizes,
            OutputKind::SpacingSizes,
        ];
        &KINDS
    }

    /// Field holding the value in option records. `None` for plain maps.
    pub fn value_field(self) -> Option<ValueField> {
        match self {
            Self::Plain => None,
            Self::Palette => Some(ValueField::Color),
            Self::FontSizes | Self::SpacingSizes => Some(ValueField::Size),
        }
    }
}

impl Display for OutputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OutputKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputKind::all()
            .iter()
            .copied()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown output kind `{0}` (expected one of: plain, palette, fontSizes, spacingSizes)")]
pub struct ParseKindError(pub String);

/// Name of the value field in an option record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueField {
    Color,
    Size,
}

impl ValueField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Size => "size",
        }
    }
}

/// One selectable option, e.g. a palette entry.
///
/// Serializes as `{ "name", "slug", "<field>" }` in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRecord {
    pub name: String,
    pub slug: String,
    pub field: ValueField,
    pub value: String,
}

impl OptionRecord {
    /// Build a record for `slug`, deriving the display name from it.
    pub fn new(slug: impl Into<String>, field: ValueField, value: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            name: title_case(&slug),
            slug,
            field,
            value: value.into(),
        }
    }
}

impl Serialize for OptionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("slug", &self.slug)?;
        map.serialize_entry(self.field.name(), &self.value)?;
        map.end()
    }
}

/// Slugs to keep. Empty keeps everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AllowList {
    slugs: Vec<String>,
}

impl AllowList {
    /// The empty list, which lets every entry through
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Whether `slug` survives filtering.
    pub fn permits(&self, slug: &str) -> bool {
        self.slugs.is_empty() || self.slugs.iter().any(|s| s == slug)
    }
}

impl From<Vec<String>> for AllowList {
    fn from(slugs: Vec<String>) -> Self {
        Self { slugs }
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            slugs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of shaping
///
/// `Absent` means no token data was supplied at all, which is different
/// from data that is present but empty. It serializes as `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transformed {
    Absent,
    Values(IndexMap<String, String>),
    Options(Vec<OptionRecord>),
}

impl Transformed {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Number of produced entries (0 when absent)
    pub fn len(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Values(values) => values.len(),
            Self::Options(options) => options.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_options(&self) -> Option<&[OptionRecord]> {
        match self {
            Self::Options(options) => Some(options),
            _ => None,
        }
    }

    /// Keys or slugs of the produced entries, in output order
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Absent => Vec::new(),
            Self::Values(values) => values.keys().map(String::as_str).collect(),
            Self::Options(options) => options.iter().map(|o| o.slug.as_str()).collect(),
        }
    }
}

impl Serialize for Transformed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_bool(false),
            Self::Values(values) => values.serialize(serializer),
            Self::Options(options) => options.serialize(serializer),
        }
    }
}

/// Shape flat tokens into the requested output.
///
/// `None` yields [`Transformed::Absent`]. The allow-list filters entries but
/// never reorders them.
pub fn shape(kind: OutputKind, flat: Option<&FlatTokens>, allow: &AllowList) -> Transformed {
    let Some(flat) = flat else {
        return Transformed::Absent;
    };

    match kind.value_field() {
        None => Transformed::Values(format_values(flat, allow)),
        Some(field) => Transformed::Options(format_options(flat, field, allow)),
    }
}

fn format_values(flat: &FlatTokens, allow: &AllowList) -> IndexMap<String, String> {
    flat.iter()
        .filter(|(key, _)| allow.permits(key))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn format_options(flat: &FlatTokens, field: ValueField, allow: &AllowList) -> Vec<OptionRecord> {
    let records = flat
        .iter()
        .map(|(key, value)| OptionRecord::new(key, field, value.to_string()));

    if allow.is_empty() {
        return records.collect();
    }
    records.filter(|record| allow.permits(&record.slug)).collect()
}
