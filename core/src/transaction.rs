//! Feed transactions

use serde::{Deserialize, Serialize};

/// A transaction as reported by the validator feed.
///
/// Transactions are produced by the feed and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash
    pub hash: String,

    /// Recipient address
    pub recipient: String,

    /// Block the transaction was included in
    pub block_height: u64,

    /// Unix timestamp in seconds
    pub timestamp_seconds: i64,

    /// Amount in the smallest unit
    pub value: u64,

    /// Hex-encoded payload, if the transaction carried one
    pub payload: Option<String>,
}

impl Transaction {
    pub fn new(
        hash: impl Into<String>,
        recipient: impl Into<String>,
        block_height: u64,
        timestamp_seconds: i64,
        value: u64,
        payload: Option<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            recipient: recipient.into(),
            block_height,
            timestamp_seconds,
            value,
            payload,
        }
    }

    /// Decode the payload, returning `None` when it is absent or not valid hex.
    pub fn payload_bytes(&self) -> Option<Vec<u8>> {
        self.payload.as_deref().and_then(|p| hex::decode(p).ok())
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_seconds.saturating_mul(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_bytes() {
        let tx = Transaction::new("h", "addr", 1, 0, 1, Some("6f6e6c696e65".to_string()));
        assert_eq!(tx.payload_bytes(), Some(b"online".to_vec()));

        let bad = Transaction::new("h", "addr", 1, 0, 1, Some("zz".to_string()));
        assert_eq!(bad.payload_bytes(), None);

        let absent = Transaction::new("h", "addr", 1, 0, 1, None);
        assert_eq!(absent.payload_bytes(), None);
    }

    #[test]
    fn test_timestamp_millis() {
        let tx = Transaction::new("h", "addr", 1, 1_700_000_000, 1, None);
        assert_eq!(tx.timestamp_millis(), 1_700_000_000_000);
    }
}
