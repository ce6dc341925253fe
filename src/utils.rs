//! Utility functions for identifiers and hashing

use bech32::Bech32m;
use uuid7::uuid7;

// construct a unique order reference then encode using bech32
pub fn new_uuid_to_bech32(hrp: &str) -> anyhow::Result<String> {
    let hrp = bech32::Hrp::parse(hrp)?;
    let encode = bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())?;
    Ok(encode)
}

/// Hash a CBOR encodable value, returning the hex digest alongside the encoding.
pub fn cbor_digest<T: minicbor::Encode<()>>(value: &T) -> anyhow::Result<(String, Vec<u8>)> {
    let cbor = minicbor::to_vec(value)?;
    let hash = sha256::digest(&cbor);

    Ok((hash, cbor))
}
