//! Deterministic short identifier derivation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Number of leading characters kept from the encoded string.
const HEAD_LEN: usize = 5;

/// Number of trailing characters kept from the encoded string.
const TAIL_LEN: usize = 5;

/// Derives the short identifier for a `(url, expire_at_raw)` pair.
///
/// The URL and the expiry text exactly as the client sent it are concatenated,
/// encoded as standard padded base64, and cut down to the first five plus the
/// last five characters. Encodings of ten characters or fewer are returned whole.
///
/// The same pair always yields the same identifier. No uniqueness check is
/// made: two different pairs can truncate to the same identifier, in which case
/// the later submission overwrites the earlier mapping.
///
/// # Examples
///
/// ```
/// use tinylink::utils::id_codec::generate_id;
///
/// let id = generate_id("https://www.google.com", "2021-07-18T16:58:30+08:00");
/// assert_eq!(id, "aHR0c6MDA=");
/// ```
pub fn generate_id(url: &str, expire_at_raw: &str) -> String {
    let mut data = String::with_capacity(url.len() + expire_at_raw.len());
    data.push_str(url);
    data.push_str(expire_at_raw);

    let encoded = STANDARD.encode(data.as_bytes());
    if encoded.len() <= HEAD_LEN + TAIL_LEN {
        return encoded;
    }

    // base64 output is ASCII, so byte offsets are char boundaries
    let mut id = String::with_capacity(HEAD_LEN + TAIL_LEN);
    id.push_str(&encoded[..HEAD_LEN]);
    id.push_str(&encoded[encoded.len() - TAIL_LEN..]);
    id
}
