//! SHA-256 digests over the canonical input and output forms

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::game::{CombatantId, EventLog, MatchDescription};

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Digest of the description's canonical input form
pub fn inputs_digest(description: &MatchDescription) -> serde_json::Result<String> {
    let canonical = description.canonical_json()?;
    Ok(sha256_hex(canonical.as_bytes()))
}

/// Digest of the canonical event text
pub fn events_digest(events: &EventLog) -> String {
    sha256_hex(events.canonical().as_bytes())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultRecord<'a> {
    inputs_digest: &'a str,
    events_digest: &'a str,
    winner: CombatantId,
}

/// Digest binding inputs, outputs and winner together
pub fn result_digest(
    inputs_digest: &str,
    events_digest: &str,
    winner: CombatantId,
) -> serde_json::Result<String> {
    let record = serde_json::to_string(&ResultRecord {
        inputs_digest,
        events_digest,
        winner,
    })?;
    Ok(sha256_hex(record.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_empty_log_digest() {
        assert_eq!(
            events_digest(&EventLog::new()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_result_digest_depends_on_winner() {
        let a = result_digest("aa", "bb", CombatantId::A).unwrap();
        let b = result_digest("aa", "bb", CombatantId::B).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_result_record_layout() {
        let record = serde_json::to_string(&ResultRecord {
            inputs_digest: "i",
            events_digest: "e",
            winner: CombatantId::A,
        })
        .unwrap();
        assert_eq!(record, r#"{"inputsDigest":"i","eventsDigest":"e","winner":"A"}"#);
    }
}
