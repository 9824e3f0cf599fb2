//! BIP-32 derivation path handling.
//!
//! This crate owns the textual and binary representations of hierarchical
//! deterministic (HD) wallet derivation paths. It parses user-specified path
//! strings into the compact binary form expected by BIP-32 key derivation,
//! renders paths back to their canonical text, and serializes them for
//! interchange. It deliberately knows nothing about keys or curves; the
//! actual child-key derivation lives in the `hd-keychain` crate.
//!
//! # Path grammar
//!
//! The BIP-32 spec <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>
//! defines derivation paths to be of the form:
//!
//! ```text
//! m / purpose' / coin_type' / account' / change / address_index
//! ```
//!
//! Absolute paths start with the `m/` prefix; relative paths have no prefix
//! in front of the first element and are appended to a caller-supplied base
//! path. Components may be written in decimal, hex (`0x2C`) or octal (`054`);
//! a trailing apostrophe marks a component as hardened. Whitespace around
//! components is ignored.
//!
//! # Usage
//!
//! ```rust
//! use hd_paths::DerivationPath;
//!
//! let path = DerivationPath::parse("m/44'/60'/0'/0/0")?;
//! assert_eq!(path.as_raw()[0], 0x8000_002C);
//! assert_eq!(path.to_string(), "m/44'/60'/0'/0/0");
//! # Ok::<(), hd_paths::PathError>(())
//! ```

mod error;
mod path;

pub use error::PathError;
pub use path::{ChildIndex, DerivationPath};

/// Default BIP-44 purpose field (`m/44'/...`) for crypto currencies.
///
/// See <https://github.com/bitcoin/bips/blob/master/bip-0044.mediawiki>.
pub const DEFAULT_PURPOSE: u32 = 44;

/// In-band hardened flag: bit 31 of a raw path index.
///
/// Raw indices at or above this value select hardened derivation. This must
/// match the hardened-child threshold of the key-derivation primitive that
/// consumes the raw indices.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;
