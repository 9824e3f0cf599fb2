//! Walking a derivation path against a key-derivation primitive.

use hd_paths::DerivationPath;

use crate::extended::ExtendedKey;

/// Capability to take a single child-derivation step.
///
/// The trait keeps the walker independent of any concrete cryptographic
/// type: production code uses [`ExtendedKey`], tests substitute stubs.
pub trait DeriveChild: Sized {
    /// Failure type of a single derivation step.
    type Error;

    /// Derives the child key at `index`; bit 31 selects hardened derivation.
    fn child(&self, index: u32) -> Result<Self, Self::Error>;
}

impl DeriveChild for ExtendedKey {
    type Error = crate::extended::KeyChainError;

    fn child(&self, index: u32) -> Result<Self, Self::Error> {
        ExtendedKey::child(self, index)
    }
}

/// Walks `path` from `master`, one child-derivation step per component.
///
/// Strict left fold in path order: the first failing step aborts the walk
/// and its error is returned, with any partially derived intermediate key
/// dropped. An empty path returns `master` unchanged.
pub fn derive_key<K: DeriveChild>(master: K, path: &DerivationPath) -> Result<K, K::Error> {
    let mut key = master;
    for &index in path.as_raw() {
        key = key.child(index)?;
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use bitcoin::Network;

    use super::*;

    /// Stub primitive that records every step and fails at a fixed one.
    #[derive(Debug)]
    struct CountingKey {
        calls: Rc<Cell<usize>>,
        fail_at: Option<usize>,
    }

    impl DeriveChild for CountingKey {
        type Error = &'static str;

        fn child(&self, _index: u32) -> Result<Self, Self::Error> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if self.fail_at == Some(call) {
                return Err("child derivation failed");
            }
            Ok(Self {
                calls: Rc::clone(&self.calls),
                fail_at: self.fail_at,
            })
        }
    }

    #[test]
    fn walks_every_component_on_success() {
        let calls = Rc::new(Cell::new(0));
        let master = CountingKey {
            calls: Rc::clone(&calls),
            fail_at: None,
        };
        let path = DerivationPath::parse("m/44'/60'/0'/0/0").expect("valid path");

        derive_key(master, &path).expect("all steps succeed");
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn stops_at_first_failing_step() {
        let calls = Rc::new(Cell::new(0));
        let master = CountingKey {
            calls: Rc::clone(&calls),
            fail_at: Some(3),
        };
        let path = DerivationPath::parse("m/44'/60'/0'/0/0").expect("valid path");

        let err = derive_key(master, &path).expect_err("third step fails");
        assert_eq!(err, "child derivation failed");
        // Steps four and five were never attempted.
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn empty_path_returns_master_unchanged() {
        let master =
            ExtendedKey::new_master(&[7u8; 32], Network::Bitcoin).expect("valid seed");
        let derived =
            derive_key(master.clone(), &DerivationPath::default()).expect("nothing to derive");
        assert_eq!(derived, master);
    }

    #[test]
    fn walk_matches_single_steps() {
        let master =
            ExtendedKey::new_master(&[7u8; 32], Network::Bitcoin).expect("valid seed");
        let path = DerivationPath::parse("m/0'/1/2'/2/1000000000").expect("valid path");

        let walked = derive_key(master.clone(), &path).expect("derivable");
        let mut stepped = master;
        for &index in path.as_raw() {
            stepped = stepped.child(index).expect("derivable");
        }
        assert_eq!(walked, stepped);
    }

    #[test]
    fn derives_bip32_vector_chain() {
        // BIP-32 test vector 1, chain m/0'/1/2'/2/1000000000.
        let seed: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let master = ExtendedKey::new_master(&seed, Network::Bitcoin).expect("valid seed");
        let path = DerivationPath::parse("m/0'/1/2'/2/1000000000").expect("valid path");

        let leaf = derive_key(master, &path).expect("derivable");
        assert_eq!(
            leaf.to_string(),
            "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76"
        );
    }
}
