use sha2::{Digest, Sha256};

/// Build a gravatar URL for an email address: 200px, PG-rated, with the
/// "mystery man" fallback for addresses without a gravatar account.
/// The address is trimmed and lowercased before hashing, per the gravatar
/// normalization rules.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());

    let mut hash = String::with_capacity(64);
    for byte in digest {
        hash.push_str(&format!("{:02x}", byte));
    }

    format!("https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm", hash)
}
