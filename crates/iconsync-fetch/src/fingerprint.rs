use sha2::{Digest, Sha256};

/// Digest-derived fingerprints are truncated to this many hex characters.
const FINGERPRINT_HEX_LEN: usize = 16;

fn digest_hex(data: &[u8]) -> String {
    let mut hex = hex::encode(Sha256::digest(data));
    hex.truncate(FINGERPRINT_HEX_LEN);
    hex
}

/// Fingerprint a full response body.
pub fn content_fingerprint(body: &[u8]) -> String {
    digest_hex(body)
}

/// Fingerprint from probe metadata, when any of it is present.
///
/// Last-Modified and Content-Length are concatenated and digested with the
/// same hash family as [`content_fingerprint`], so the two digest paths stay
/// comparable. ETags never pass through here; they are used verbatim.
pub fn metadata_fingerprint(last_modified: Option<&str>, content_length: Option<u64>) -> Option<String> {
    if last_modified.is_none() && content_length.is_none() {
        return None;
    }
    let seed = format!(
        "{}:{}",
        last_modified.unwrap_or(""),
        content_length.map(|n| n.to_string()).unwrap_or_default(),
    );
    Some(digest_hex(seed.as_bytes()))
}
