/// XRP Ledger primitives: encodings and identifiers.
///
/// This crate provides the foundational building blocks shared by the
/// other workspace crates:
/// - Double SHA-256 checksums
/// - Base58 encoding/decoding with the XRP Ledger ("ripple") alphabet
/// - Classic account addresses (`r...`)
/// - Family seeds (`s...`) and the key type they encode
///
/// Key derivation and signing are not implemented here; they are delegated
/// to the ledger node.

pub mod hash;
pub mod base58;
pub mod address;
pub mod seed;

mod error;
pub use error::PrimitivesError;
pub use address::ClassicAddress;
pub use seed::{KeyType, Seed};
