//! Transaction classification
//!
//! Validators signal by sending a transaction of exactly one smallest unit to
//! the burn address. The payload says what the signal means: the `online`
//! marker is a heartbeat, a 32-byte hash is a readiness vote for the window
//! the transaction landed in.

use readiness_core::{Transaction, Window};

/// ASCII marker carried by heartbeat payloads
pub const ONLINE_MARKER: &[u8] = b"online";

/// Decoded length of a readiness vote payload
pub const VOTE_PAYLOAD_LEN: usize = 32;

const SIGNAL_VALUE: u64 = 1;

fn is_signal(txn: &Transaction, burn_address: &str) -> bool {
    txn.recipient == burn_address && txn.value == SIGNAL_VALUE
}

/// Heartbeat payloads only need to start with the hex-encoded marker.
fn has_online_marker(payload: &str) -> bool {
    let marker = hex::encode(ONLINE_MARKER);
    payload
        .get(..marker.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&marker))
}

/// Whether `txn` is an online heartbeat at or above `min_block_height`
pub fn classify_heartbeat(txn: &Transaction, burn_address: &str, min_block_height: u64) -> bool {
    is_signal(txn, burn_address)
        && txn.block_height >= min_block_height
        && txn.payload.as_deref().is_some_and(has_online_marker)
}

/// Whether `txn` is a readiness vote cast inside `window`
pub fn classify_readiness_vote(txn: &Transaction, burn_address: &str, window: &Window) -> bool {
    is_signal(txn, burn_address)
        && window.contains(txn.block_height)
        && txn
            .payload_bytes()
            .is_some_and(|bytes| bytes.len() == VOTE_PAYLOAD_LEN)
}

/// First transaction in feed order accepted by `predicate`.
///
/// Feed order is not chronological, so this is not necessarily the latest
/// signal. Callers rely on that: the first match is what gets reported.
pub fn first_qualifying<'a, F>(transactions: &'a [Transaction], predicate: F) -> Option<&'a Transaction>
where
    F: Fn(&Transaction) -> bool,
{
    transactions.iter().find(|txn| predicate(txn))
}
