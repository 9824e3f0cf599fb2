//! The [`DerivationPath`] value type and its parsing/formatting logic.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::PathError, HARDENED_OFFSET};

/// A single path component with the hardened flag held out-of-band.
///
/// The binary path encoding stores the hardened flag in bit 31 of each index
/// ([`HARDENED_OFFSET`]); this type is the explicit view used at API
/// boundaries so callers never hand around ambiguous raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChildIndex {
    /// Non-hardened derivation component.
    Normal {
        /// The 31-bit component value.
        index: u32,
    },
    /// Hardened derivation component.
    Hardened {
        /// The 31-bit component value, without the hardened offset.
        index: u32,
    },
}

impl ChildIndex {
    /// Creates a non-hardened component, checking the 31-bit bound.
    pub fn from_normal_index(index: u32) -> Result<Self, PathError> {
        if index >= HARDENED_OFFSET {
            return Err(PathError::ComponentOutOfRange {
                value: i128::from(index),
                max: HARDENED_OFFSET - 1,
                hardened: false,
            });
        }
        Ok(Self::Normal { index })
    }

    /// Creates a hardened component, checking the 31-bit bound.
    pub fn from_hardened_index(index: u32) -> Result<Self, PathError> {
        if index >= HARDENED_OFFSET {
            return Err(PathError::ComponentOutOfRange {
                value: i128::from(index),
                max: HARDENED_OFFSET - 1,
                hardened: true,
            });
        }
        Ok(Self::Hardened { index })
    }

    /// Decodes a raw in-band index into its explicit form.
    pub const fn from_raw(raw: u32) -> Self {
        if raw >= HARDENED_OFFSET {
            Self::Hardened {
                index: raw - HARDENED_OFFSET,
            }
        } else {
            Self::Normal { index: raw }
        }
    }

    /// Encodes this component into the raw in-band form consumed by the
    /// key-derivation primitive.
    pub const fn to_raw(self) -> u32 {
        match self {
            Self::Normal { index } => index,
            Self::Hardened { index } => index + HARDENED_OFFSET,
        }
    }

    /// The 31-bit component value, without the hardened offset.
    pub const fn index(self) -> u32 {
        match self {
            Self::Normal { index } | Self::Hardened { index } => index,
        }
    }

    /// Whether this component selects hardened derivation.
    pub const fn is_hardened(self) -> bool {
        matches!(self, Self::Hardened { .. })
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal { index } => write!(f, "{index}"),
            Self::Hardened { index } => write!(f, "{index}'"),
        }
    }
}

/// The computer friendly form of a hierarchical deterministic wallet account
/// derivation path: an ordered sequence of raw `u32` indices, walked from the
/// root key down.
///
/// Each index's bit 31 is the in-band hardened flag; the remaining 31 bits
/// are the component value. BIP-44 defines the purpose field to be `44'`
/// (`0x8000002C`) for crypto currencies, and SLIP-44 assigns e.g. coin type
/// `60'` (`0x8000003C`) to Ethereum.
///
/// Values are immutable once constructed; [`DerivationPath::child`] and
/// friends produce extended copies rather than mutating in place.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// Parses an absolute derivation path (one starting with the `m/`
    /// prefix) into the binary representation.
    ///
    /// Relative path strings fail with [`PathError::MissingBasePath`]; use
    /// [`DerivationPath::parse_relative`] to resolve those against a base.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        Self::parse_inner(path, None)
    }

    /// Parses a path string, resolving relative notation against `base`.
    ///
    /// Absolute strings (`m/...`) ignore `base` entirely; relative strings
    /// yield a copy of `base` with the parsed components appended.
    pub fn parse_relative(path: &str, base: &Self) -> Result<Self, PathError> {
        Self::parse_inner(path, Some(base))
    }

    fn parse_inner(path: &str, base: Option<&Self>) -> Result<Self, PathError> {
        let mut result = Vec::new();

        // Classify absolute vs relative on the first component. Trimming
        // happens before comparison, so a whitespace-only leading component
        // is the ambiguous case, not a relative one.
        let mut split = path.split('/');
        let Some(first) = split.next() else {
            return Err(PathError::EmptyPath);
        };

        let mut components: Vec<&str> = Vec::new();
        match first.trim() {
            "" => return Err(PathError::AmbiguousPath),
            "m" => components.extend(split),
            _ => {
                let Some(base) = base else {
                    return Err(PathError::MissingBasePath);
                };
                result.extend_from_slice(base.as_raw());
                components.push(first);
                components.extend(split);
            }
        }

        // Catches both a bare "m" and a relative path with no segments.
        if components.is_empty() {
            return Err(PathError::EmptyPath);
        }

        for component in components {
            // Ignore any user added whitespace.
            let mut component = component.trim();

            // The trailing apostrophe marks a hardened component; stripping
            // it leaves a plain integer literal with a lowered ceiling.
            let mut offset = 0u32;
            if let Some(stripped) = component.strip_suffix('\'') {
                offset = HARDENED_OFFSET;
                component = stripped.trim();
            }

            // Parse into 128 bits first so an oversized literal cannot wrap
            // before the range check sees it.
            let value = parse_integer(component)
                .ok_or_else(|| PathError::InvalidComponent(component.to_owned()))?;
            let max = u32::MAX - offset;
            if value < 0 || value > i128::from(max) {
                return Err(PathError::ComponentOutOfRange {
                    value,
                    max,
                    hardened: offset != 0,
                });
            }

            result.push(offset + value as u32);
        }

        Ok(Self(result))
    }

    /// The raw in-band encoded indices, in root-to-leaf walk order.
    pub fn as_raw(&self) -> &[u32] {
        &self.0
    }

    /// Iterates over the components in their explicit-flag form.
    pub fn child_indexes(&self) -> impl Iterator<Item = ChildIndex> + '_ {
        self.0.iter().copied().map(ChildIndex::from_raw)
    }

    /// Returns a new path with `index` appended.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut raw = self.0.clone();
        raw.push(index.to_raw());
        Self(raw)
    }

    /// Returns a new path with all of `suffix`'s components appended.
    pub fn extend(&self, suffix: &Self) -> Self {
        let mut raw = self.0.clone();
        raw.extend_from_slice(&suffix.0);
        Self(raw)
    }

    /// The number of components in this path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this path has no components (the root itself).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses a component as a C-style integer literal: `0x`/`0X` selects
/// hexadecimal, a leading `0` selects octal, decimal otherwise.
fn parse_integer(text: &str) -> Option<i128> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        parse_radix(hex, 16)?
    } else if digits.len() > 1 && digits.starts_with('0') {
        parse_radix(&digits[1..], 8)?
    } else {
        parse_radix(digits, 10)?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_radix(digits: &str, radix: u32) -> Option<i128> {
    // from_str_radix would accept a second sign here; only bare digits are
    // valid at this point.
    if digits.starts_with(['+', '-']) {
        return None;
    }
    i128::from_str_radix(digits, radix).ok()
}

impl FromStr for DerivationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    /// Canonical representation: always decimal components, a trailing `'`
    /// on hardened ones, regardless of the notation used at parse time.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in self.child_indexes() {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(indexes: Vec<ChildIndex>) -> Self {
        indexes.into_iter().collect()
    }
}

impl FromIterator<ChildIndex> for DerivationPath {
    fn from_iter<T: IntoIterator<Item = ChildIndex>>(iter: T) -> Self {
        Self(iter.into_iter().map(ChildIndex::to_raw).collect())
    }
}

impl AsRef<[u32]> for DerivationPath {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    /// Deserializes from the canonical string form. No base path is
    /// available at this boundary, so relative strings are rejected.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Self::parse(&path).map_err(de::Error::custom)
    }
}
