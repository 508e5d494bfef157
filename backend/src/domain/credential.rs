//! Password digests stored as Argon2id PHC strings.
//!
//! A stored value looks like `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`.
//! Parameters travel with the digest, so verification keeps working when the
//! defaults for new digests change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Raised when a stored digest is not a PHC string Argon2 understands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored credential digest is malformed")]
pub struct MalformedDigest;

/// Raised when a password cannot be hashed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to hash password: {message}")]
pub struct HashFailure {
    message: String,
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns [`HashFailure`] when Argon2 rejects the input, e.g. a password
/// longer than the algorithm accepts.
///
/// # Examples
/// ```
/// use backend::domain::credential::{hash_password, verify_password};
///
/// let stored = hash_password("hunter2").expect("hashable");
/// assert!(stored.starts_with("$argon2id$"));
/// assert_eq!(verify_password("hunter2", &stored), Ok(true));
/// assert_eq!(verify_password("hunter3", &stored), Ok(false));
/// ```
pub fn hash_password(password: &str) -> Result<String, HashFailure> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| HashFailure {
            message: err.to_string(),
        })
}

/// Check a password against a stored PHC string.
///
/// The comparison is constant time.
///
/// # Errors
///
/// Returns [`MalformedDigest`] when `stored` does not parse or names an
/// algorithm Argon2 cannot verify.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, MalformedDigest> {
    let parsed = PasswordHash::new(stored).map_err(|_| MalformedDigest)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(_) => Err(MalformedDigest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stored(password: &str) -> String {
        hash_password(password).expect("hashable password")
    }

    #[rstest]
    fn hashes_are_salted() {
        assert_ne!(stored("same"), stored("same"));
    }

    #[rstest]
    fn stored_form_is_an_argon2id_phc_string() {
        let digest = stored("pw");
        let parsed = PasswordHash::new(&digest).expect("parses as PHC");
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(parsed.salt.is_some());
        assert!(parsed.hash.is_some());
    }

    #[rstest]
    fn verify_accepts_matching_password() {
        let digest = stored("correct horse");
        assert_eq!(verify_password("correct horse", &digest), Ok(true));
        assert_eq!(verify_password("Correct horse", &digest), Ok(false));
    }

    #[rstest]
    #[case("")]
    #[case("plain")]
    #[case("0123abcd$deadbeef")]
    #[case("$pbkdf2-sha256$i=1000$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA")]
    fn malformed_digests_are_rejected(#[case] digest: &str) {
        assert_eq!(verify_password("pw", digest), Err(MalformedDigest));
    }
}
