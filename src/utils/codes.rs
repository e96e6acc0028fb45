//! Referral code and session token generation.
//!
//! Referral codes are human-readable and derived from the affiliate's
//! name and store-assigned id; session tokens are opaque random values.

use base64::Engine as _;
use rand::Rng;

/// Length of random bytes behind a session token before base64 encoding.
const SESSION_TOKEN_BYTES: usize = 24;

/// Length of random bytes behind a placeholder code suffix.
const PLACEHOLDER_SUFFIX_BYTES: usize = 6;

/// First code segment used when the affiliate's name is blank.
const FALLBACK_NAME_TOKEN: &str = "affiliate";

/// Derives an affiliate's referral code from their name and account id.
///
/// The code is the lowercased first whitespace-delimited token of the
/// name (or a fixed fallback word when the name has none), followed by
/// the last four characters of the decimal id, followed by a three-digit
/// random suffix.
///
/// The result is not guaranteed unique; the caller relies on the store's
/// uniqueness constraint and does not retry on collision.
///
/// # Examples
///
/// ```ignore
/// let code = referral_code("Asha Rao", 1234567);
/// assert!(code.starts_with("asha4567"));
/// assert_eq!(code.len(), "asha".len() + 4 + 3);
/// ```
pub fn referral_code(name: &str, id: i64) -> String {
    let token = name
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_else(|| FALLBACK_NAME_TOKEN.to_string());

    let id_str = id.to_string();
    let tail_start = id_str.len().saturating_sub(4);
    let tail = &id_str[tail_start..];

    let suffix: u32 = rand::rng().random_range(100..1000);

    format!("{token}{tail}{suffix}")
}

/// Generates a unique placeholder referral code for a freshly created
/// account.
///
/// Registration persists the account first to obtain its id, then
/// replaces this placeholder with the final code. The random suffix
/// keeps concurrent registrations (and registrations abandoned between
/// the two steps) from colliding on the uniqueness constraint.
pub fn placeholder_code() -> String {
    let mut buffer = [0u8; PLACEHOLDER_SUFFIX_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    format!(
        "pending-{}",
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
    )
}

/// Generates a cryptographically secure opaque session token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe
/// base64 without padding, producing a 32-character token.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_session_token() -> String {
    let mut buffer = [0u8; SESSION_TOKEN_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
