use std::fmt;

use crate::errors::{AmaraError, Result};

pub(crate) const API_KEY_LEN: usize = 40;

/// `true` if `key` is exactly 40 lowercase hex characters.
pub fn is_valid_api_key(key: &str) -> bool {
    key.len() == API_KEY_LEN && key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// `true` if `tag` is non-empty and only uses ASCII letters, digits, `-` or `_`.
pub fn is_valid_api_version(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Account identity: host, username and API key, validated on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    host: String,
    username: String,
    api_key: String,
}

impl Credentials {
    /// Validate the key and normalise the host to end in `/`.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if !is_valid_api_key(&api_key) {
            return Err(AmaraError::InvalidApiKey);
        }

        let username = username.into();
        if username.is_empty() {
            return Err(AmaraError::MissingCredentials {
                message: "username must not be empty".into(),
            });
        }

        let mut host = host.into();
        if !host.ends_with('/') {
            host.push('/');
        }

        Ok(Self {
            host,
            username,
            api_key,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Check that moving from `self` to `next` does not carry the key over to
    /// an account that differs only by host or only by username.
    pub fn check_switch(&self, next: &Credentials) -> Result<()> {
        if next.api_key != self.api_key {
            return Ok(());
        }

        let host_changed = next.host != self.host;
        let user_changed = next.username != self.username;

        match (host_changed, user_changed) {
            (true, false) => Err(AmaraError::CredentialReuse {
                message: format!(
                    "host changed to {} but username {} and key were kept",
                    next.host, next.username
                ),
            }),
            (false, true) => Err(AmaraError::CredentialReuse {
                message: format!(
                    "username changed to {} on {} but key was kept",
                    next.username, next.host
                ),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0123456789abcdef0123456789abcdef01234567";
    const OTHER_KEY: &str = "fedcba9876543210fedcba9876543210fedcba98";

    #[test]
    fn accepts_lowercase_hex_keys() {
        assert!(is_valid_api_key(KEY));
        assert!(is_valid_api_key(&"f".repeat(40)));
        assert!(Credentials::new("https://amara.org/api/", "alice", KEY).is_ok());
    }

    #[test]
    fn rejects_everything_else() {
        let too_long = format!("{KEY}0");
        let upper = KEY.to_uppercase();
        let bad_keys: [&str; 7] = [
            "",
            "abc",
            &KEY[..39],
            too_long.as_str(),
            upper.as_str(),
            "g123456789abcdef0123456789abcdef01234567",
            " 123456789abcdef0123456789abcdef01234567",
        ];
        for bad in bad_keys {
            assert!(!is_valid_api_key(bad), "{bad:?} should be rejected");
            assert!(matches!(
                Credentials::new("https://amara.org/api/", "alice", bad),
                Err(AmaraError::InvalidApiKey)
            ));
        }
    }

    #[test]
    fn api_version_tags() {
        assert!(is_valid_api_version("20190619"));
        assert!(is_valid_api_version("beta_2-x"));
        assert!(!is_valid_api_version(""));
        assert!(!is_valid_api_version("v1.2"));
        assert!(!is_valid_api_version("a b"));
    }

    #[test]
    fn host_gets_trailing_slash() {
        let c = Credentials::new("https://amara.org/api", "alice", KEY).unwrap();
        assert_eq!(c.host(), "https://amara.org/api/");
    }

    #[test]
    fn debug_redacts_key() {
        let c = Credentials::new("https://amara.org/api/", "alice", KEY).unwrap();
        assert!(!format!("{c:?}").contains(KEY));
    }

    #[test]
    fn switch_rules() {
        let current = Credentials::new("https://a.example/api/", "alice", KEY).unwrap();

        let host_only = Credentials::new("https://b.example/api/", "alice", KEY).unwrap();
        assert!(matches!(
            current.check_switch(&host_only),
            Err(AmaraError::CredentialReuse { .. })
        ));

        let user_only = Credentials::new("https://a.example/api/", "bob", KEY).unwrap();
        assert!(matches!(
            current.check_switch(&user_only),
            Err(AmaraError::CredentialReuse { .. })
        ));

        let full_switch = Credentials::new("https://b.example/api/", "bob", KEY).unwrap();
        assert!(current.check_switch(&full_switch).is_ok());

        let new_key = Credentials::new("https://b.example/api/", "alice", OTHER_KEY).unwrap();
        assert!(current.check_switch(&new_key).is_ok());

        assert!(current.check_switch(&current.clone()).is_ok());
    }
}
