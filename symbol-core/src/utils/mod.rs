mod base32;
pub use base32::{decode as base32_decode, encode as base32_encode, Base32DecodeError};

mod hash;
pub use hash::{merkle_root, ripemd160, sha3_256};
