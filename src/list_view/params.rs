//! Order-preserving URL query parameters.

use url::form_urlencoded;

/// Decoded `key=value` pairs of a query string in their original order.
///
/// Parameters a list view does not own are carried through untouched so a
/// shallow navigation never drops them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Parses a raw query string. A leading `?` is accepted.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self(
            form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces the value of `key` in place or appends it when missing.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut seen = false;
        self.0.retain_mut(|(name, current)| {
            if name != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *current = value.clone();
            true
        });
        if !seen {
            self.0.push((key.to_string(), value));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(name, _)| name != key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    /// Query string usable as a relative link, `?` alone when empty.
    pub fn to_href(&self) -> String {
        format!("?{}", self.to_query_string())
    }
}
