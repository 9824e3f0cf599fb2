//! The opaque extended-key handle over the BIP-32 primitive.

use std::{fmt, str::FromStr};

use bitcoin::{
    bip32::{self, ChildNumber, Xpriv},
    Network,
};
use rand::{rngs::OsRng, RngCore};
use secp256k1::SECP256K1;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Recommended seed length in bytes.
pub const RECOMMENDED_SEED_LEN: usize = 32;

/// Minimum accepted seed length in bytes.
pub const MIN_SEED_BYTES: usize = 16;

/// Maximum accepted seed length in bytes.
pub const MAX_SEED_BYTES: usize = 64;

/// First index at which child derivation switches to the hardened variant.
///
/// Must equal [`hd_paths::HARDENED_OFFSET`], since raw path indices are
/// handed to the primitive unchanged.
pub const HARDENED_KEY_START: u32 = 0x8000_0000;

/// Errors raised by key-chain operations.
///
/// Primitive-raised failures keep their own variant so callers can tell bad
/// cryptographic input apart from bad path text ([`hd_paths::PathError`]).
#[derive(Debug, thiserror::Error)]
pub enum KeyChainError {
    /// Seed material outside the accepted byte-length bounds.
    #[error(
        "seed length {len} outside allowed range [{min}, {max}]",
        min = MIN_SEED_BYTES,
        max = MAX_SEED_BYTES
    )]
    InvalidSeedLength {
        /// The offending seed length.
        len: usize,
    },

    /// Failure surfaced by the BIP-32 primitive, passed through unchanged.
    #[error("BIP32 derivation error: {0}")]
    Bip32(#[from] bip32::Error),
}

/// A node in the HD key tree: the master key or any derived descendant.
///
/// The handle is opaque on purpose; consumers only ever take single
/// derivation steps ([`ExtendedKey::child`]) or move the key across a
/// serialization boundary. Everything cryptographic is delegated to
/// [`bitcoin::bip32`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKey(Xpriv);

impl ExtendedKey {
    /// Builds a master key from seed bytes and network parameters.
    ///
    /// The seed must be within `[MIN_SEED_BYTES, MAX_SEED_BYTES]`; the
    /// underlying primitive does not enforce this itself.
    pub fn new_master(seed: &[u8], network: Network) -> Result<Self, KeyChainError> {
        if !(MIN_SEED_BYTES..=MAX_SEED_BYTES).contains(&seed.len()) {
            return Err(KeyChainError::InvalidSeedLength { len: seed.len() });
        }
        Ok(Self(Xpriv::new_master(network, seed)?))
    }

    /// Takes a single BIP-32 derivation step.
    ///
    /// Bit 31 of `index` selects hardened derivation, matching
    /// [`HARDENED_KEY_START`].
    pub fn child(&self, index: u32) -> Result<Self, KeyChainError> {
        let child = self.0.derive_priv(SECP256K1, &[ChildNumber::from(index)])?;
        Ok(Self(child))
    }
}

impl FromStr for ExtendedKey {
    type Err = KeyChainError;

    /// Parses a previously serialized extended key (base58 `xprv...` form).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Xpriv::from_str(s)?))
    }
}

impl fmt::Display for ExtendedKey {
    /// The primitive's canonical base58 serialized form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for ExtendedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExtendedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(de::Error::custom)
    }
}

/// Produces cryptographically secure random seed material of the requested
/// length, subject to the same bounds as [`ExtendedKey::new_master`].
pub fn generate_seed(length: u8) -> Result<Vec<u8>, KeyChainError> {
    let len = usize::from(length);
    if !(MIN_SEED_BYTES..=MAX_SEED_BYTES).contains(&len) {
        return Err(KeyChainError::InvalidSeedLength { len });
    }
    let mut seed = vec![0u8; len];
    OsRng.fill_bytes(&mut seed);
    Ok(seed)
}
