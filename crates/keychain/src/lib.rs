//! BIP-32 key chains: extended keys plus derivation-path walking.
//!
//! This crate wraps the external key-derivation primitive
//! ([`bitcoin::bip32`]) behind an opaque [`ExtendedKey`] handle and walks
//! [`hd_paths::DerivationPath`] values against it. The cryptography itself
//! (secp256k1 arithmetic, the HMAC child-key formula) lives entirely in the
//! primitive; this crate only sequences single derivation steps.
//!
//! # Usage
//!
//! ```rust
//! use bitcoin::Network;
//! use hd_keychain::{derive_key, generate_seed, ExtendedKey, RECOMMENDED_SEED_LEN};
//! use hd_paths::DerivationPath;
//!
//! let seed = generate_seed(RECOMMENDED_SEED_LEN as u8)?;
//! let master = ExtendedKey::new_master(&seed, Network::Bitcoin)?;
//!
//! let path = DerivationPath::parse("m/44'/0'/0'/0/0")?;
//! let account = derive_key(master, &path)?;
//! println!("{account}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod derive;
mod extended;

pub use derive::{derive_key, DeriveChild};
pub use extended::{
    generate_seed, ExtendedKey, KeyChainError, HARDENED_KEY_START, MAX_SEED_BYTES, MIN_SEED_BYTES,
    RECOMMENDED_SEED_LEN,
};
