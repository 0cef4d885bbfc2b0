//! Seeding of the deterministic generator behind keypair derivation.
//!
//! The generator is ChaCha20 with a 32-byte seed. Key material of any
//! non-zero length is mapped onto that seed:
//!
//! - shorter material wraps around (byte `i` of the seed is
//!   `material[i % len]`);
//! - longer material is XOR-folded, so byte `j >= 32` of the material is
//!   XORed into seed byte `j % 32` after the first 32 bytes are laid down.
//!
//! This mapping is frozen. Altering it silently re-keys every account.

use crate::error::{CryptoError, CryptoResult};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroizing;

/// Seed length consumed by the generator.
pub const SEED_SIZE: usize = 32;

/// Maps key material onto a generator seed.
pub fn seed_from_key_material(material: &[u8]) -> CryptoResult<Zeroizing<[u8; SEED_SIZE]>> {
    if material.is_empty() {
        return Err(CryptoError::KeyGeneration(
            "empty key material cannot seed the generator".to_string(),
        ));
    }

    let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
    for (i, slot) in seed.iter_mut().enumerate() {
        *slot = material[i % material.len()];
    }
    for (i, byte) in material.iter().enumerate().skip(SEED_SIZE) {
        seed[i % SEED_SIZE] ^= byte;
    }
    Ok(seed)
}

/// Builds the deterministic generator for the given key material.
pub fn seeded_rng(material: &[u8]) -> CryptoResult<ChaCha20Rng> {
    let seed = seed_from_key_material(material)?;
    Ok(ChaCha20Rng::from_seed(*seed))
}
