use sha2::{Digest, Sha256};

/// SHA-256 of the alert text, hex encoded. Used as the dedupe key.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let text = "ALERT: Geomagnetic K-index of 7\nNOAA Scale: G3 - Strong";
        assert_eq!(fingerprint(text), fingerprint(text));
    }

    #[test]
    fn distinct_text_distinct_fingerprint() {
        let samples = [
            "",
            "G4 storm expected",
            "G4 storm expected ",
            "g4 storm expected",
            "🧠 K-index Alert: Kp = 7.50 at 2025-06-01T12:00:00",
            "🧠 K-index Alert: Kp = 7.50 at 2025-06-01T12:01:00",
        ];
        for (i, a) in samples.iter().enumerate() {
            for b in &samples[i + 1..] {
                assert_ne!(fingerprint(a), fingerprint(b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn matches_known_sha256() {
        assert_eq!(
            fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(fingerprint("hello").len(), 64);
    }
}
