//! Connection properties passed alongside a URL.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered string properties (user, password, backend options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display form with the values of `secret_keys` replaced by `[HIDDEN]`.
    /// Keys match case-insensitively.
    pub fn redacted<'a>(&'a self, secret_keys: &'a [&'a str]) -> Redacted<'a> {
        Redacted {
            properties: self,
            secret_keys,
        }
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.redacted(&[]), f)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// See [`Properties::redacted`].
pub struct Redacted<'a> {
    properties: &'a Properties,
    secret_keys: &'a [&'a str],
}

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, (key, value)) in self.properties.iter().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            let secret = self
                .secret_keys
                .iter()
                .any(|s| s.eq_ignore_ascii_case(key));
            if secret {
                write!(f, "{key}=[HIDDEN]")?;
            } else {
                write!(f, "{key}={value}")?;
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_secret_keys() {
        let props = Properties::new().with("user", "sa").with("Password", "hunter2");
        assert_eq!(
            props.redacted(&["password"]).to_string(),
            "{Password=[HIDDEN], user=sa}"
        );
        assert_eq!(props.to_string(), "{Password=hunter2, user=sa}");
    }
}
