//! Object types and parsing of `Type_number[_Border]` identifiers
//!
//! Identifiers are parsed exactly once, when records enter the registry.
//! Everything downstream works with [`ObjectType`] and the parsed number.

use std::fmt;

use serde::Deserialize;

const BORDER_SUFFIX: &str = "_Border";
const LEGACY_BORDER_PREFIX: &str = "Border_";

/// Kind of segmented object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// Segmented nucleus, modelled as an oriented ellipse
    Nucleus,
    /// Cytoplasm region belonging to the nucleus with the same number
    Cytoplasm,
    /// Whole cell (nucleus plus cytoplasm) with the same number
    Cell,
    /// Blood vessel lumen
    Vessel,
}

impl ObjectType {
    /// All types in table order
    pub const ALL: [Self; 4] = [Self::Nucleus, Self::Cytoplasm, Self::Cell, Self::Vessel];

    /// Identifier prefix, including the separator
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Nucleus => "Nucleus_",
            Self::Cytoplasm => "Cytoplasm_",
            Self::Cell => "Cell_",
            Self::Vessel => "Vessel_",
        }
    }

    /// Plural label used in group names
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Nucleus => "Nuclei",
            Self::Cytoplasm => "Cytoplasms",
            Self::Cell => "Cells",
            Self::Vessel => "Vessels",
        }
    }

    /// Whether the type inherits relationship metrics from its nucleus
    pub const fn is_triplet_member(self) -> bool {
        matches!(self, Self::Cytoplasm | Self::Cell)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Nucleus => "Nucleus",
            Self::Cytoplasm => "Cytoplasm",
            Self::Cell => "Cell",
            Self::Vessel => "Vessel",
        };
        f.write_str(label)
    }
}

/// Recognised identifier prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePrefix {
    /// One of the four object type prefixes
    Typed(ObjectType),
    /// Legacy `Border_` prefix used for border vessels by older segmentations
    LegacyBorder,
}

impl NamePrefix {
    /// Object type implied by the prefix
    pub const fn object_type(self) -> ObjectType {
        match self {
            Self::Typed(kind) => kind,
            Self::LegacyBorder => ObjectType::Vessel,
        }
    }
}

/// Parsed `Type_number[_Border]` identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    raw: String,
    prefix: Option<NamePrefix>,
    number: Option<u32>,
    border_suffix: bool,
}

impl ObjectName {
    /// Parse an identifier
    ///
    /// Never fails: unknown prefixes leave [`Self::prefix`] empty and a
    /// missing or malformed number leaves [`Self::number`] empty.
    pub fn parse(raw: &str) -> Self {
        let split = raw.split_once(BORDER_SUFFIX);
        let stem = split.map_or(raw, |(stem, _)| stem);

        let typed = ObjectType::ALL.into_iter().find_map(|kind| {
            stem.strip_prefix(kind.prefix())
                .map(|rest| (NamePrefix::Typed(kind), rest))
        });
        let matched = typed.or_else(|| {
            stem.strip_prefix(LEGACY_BORDER_PREFIX)
                .map(|rest| (NamePrefix::LegacyBorder, rest))
        });

        let (prefix, number) = match matched {
            Some((prefix, rest)) => (Some(prefix), rest.parse::<u32>().ok()),
            None => (None, None),
        };

        Self {
            raw: raw.to_string(),
            prefix,
            number,
            border_suffix: split.is_some(),
        }
    }

    /// Identifier exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Recognised prefix, if any
    pub const fn prefix(&self) -> Option<NamePrefix> {
        self.prefix
    }

    /// Numeric part, if it parsed
    pub const fn number(&self) -> Option<u32> {
        self.number
    }

    /// Whether the identifier carries the `_Border` suffix
    pub const fn has_border_suffix(&self) -> bool {
        self.border_suffix
    }

    /// Whether the identifier uses the legacy `Border_` prefix
    pub fn is_legacy_border(&self) -> bool {
        self.prefix == Some(NamePrefix::LegacyBorder)
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
