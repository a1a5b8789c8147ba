//! Key management
//!
//! Ed25519 key pairs, signatures and the hex account addresses derived from
//! public keys.

pub mod address;
pub mod keypair;

pub use address::{Address, ADDRESS_LEN};
pub use keypair::{
    generate_keypair, sign, verify, PrivateKey, PublicKey, Signature, PUBLIC_KEY_LEN, SEED_LEN,
    SIGNATURE_LEN,
};
