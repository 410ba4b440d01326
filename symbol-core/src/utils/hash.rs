//! Hashing routines used across the Symbol data model.

use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256};

/// Compute the SHA3-256 hash of input bytes.
///
/// Symbol uses SHA3-256 (not Keccak) for transaction hashes, address
/// digests and namespace identifiers.
pub fn sha3_256<T: AsRef<[u8]>>(bytes: T) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(bytes.as_ref());
    hasher.finalize().into()
}

/// Compute the RIPEMD-160 hash of input bytes.
pub fn ripemd160<T: AsRef<[u8]>>(bytes: T) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(bytes.as_ref());
    hasher.finalize().into()
}

/// Compute the Merkle root of a list of hashes.
///
/// Pairs are combined with SHA3-256; an odd node at any level is paired with
/// itself. An empty list yields the zero hash, a single element is its own
/// root. Aggregate transactions commit to their embedded transactions with
/// this root.
pub fn merkle_root(hashes: &[[u8; 32]]) -> [u8; 32] {
    if hashes.is_empty() {
        return [0u8; 32]
    }

    let mut level: Vec<[u8; 32]> = hashes.to_vec();
    while level.len() > 1 {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        for pair in level.chunks(2) {
            let right = pair.get(1).unwrap_or(&pair[0]);
            let mut data = [0u8; 64];
            data[..32].copy_from_slice(&pair[0]);
            data[32..].copy_from_slice(right);
            next.push(sha3_256(data));
        }
        level = next;
    }
    level[0]
}
