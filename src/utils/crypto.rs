use ring::digest::{Context, SHA256};
use ripemd::{Digest as RipemdDigest, Ripemd160};

use crate::error::{LedgerError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Nanoseconds since the Unix epoch
pub fn current_timestamp() -> Result<i64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LedgerError::Clock(format!("System time error: {e}")))?;
    nanos_to_timestamp(duration.as_nanos())
}

fn nanos_to_timestamp(nanos: u128) -> Result<i64> {
    i64::try_from(nanos).map_err(|_| LedgerError::Clock("Timestamp overflow".to_string()))
}

pub fn sha256_digest(data: &[u8]) -> [u8; 32] {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();

    let mut out = [0u8; 32];
    out.copy_from_slice(digest.as_ref());
    out
}

pub fn ripemd160_digest(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);

    let mut out = [0u8; 20];
    out.copy_from_slice(&hasher.finalize());
    out
}
