//! The flat string mapping carried by every record, and the codec that moves
//! typed descriptors in and out of it.
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Metadata keys with a fixed, codec-assigned meaning.
///
/// The names are part of the contract with the downstream dashboards and must
/// stay bit-exact. Caller metadata using the same names is overwritten when a
/// descriptor is encoded over it.
pub mod keys {
    /// Error domain.
    pub const DOMAIN: &str = "domain";
    /// Error code, as a decimal integer.
    pub const CODE: &str = "code";
    /// Localized error description.
    pub const DESCRIPTION: &str = "description";
    /// Localized failure reason.
    pub const FAILURE_REASON: &str = "failureReason";
    /// Localized recovery suggestion.
    pub const RECOVERY_SUGGESTION: &str = "recoverySuggestion";
    /// Name of the screen being viewed.
    pub const SCREEN_NAME: &str = "screenName";
    /// Class implementing the screen being viewed.
    pub const SCREEN_CLASS: &str = "screenClass";

    /// The five keys written by the error codec.
    pub const ERROR_KEYS: [&str; 5] = [
        DOMAIN,
        CODE,
        DESCRIPTION,
        FAILURE_REASON,
        RECOVERY_SUGGESTION,
    ];

    /// The two keys written by the screen codec.
    pub const SCREEN_KEYS: [&str; 2] = [SCREEN_NAME, SCREEN_CLASS];

    /// Returns true if `key` is reserved by either codec.
    pub fn is_reserved(key: &str) -> bool {
        ERROR_KEYS.contains(&key) || SCREEN_KEYS.contains(&key)
    }
}

/// String-to-string mapping attached to a log record.
///
/// Iteration order is the key order, which keeps sink output stable; callers
/// must not rely on it otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(transparent))]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Metadata(BTreeMap::new())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if `key` is present, even with an empty value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }
}

/// Iterator over the entries of a [`Metadata`].
#[derive(Debug)]
pub struct Iter<'a>(btree_map::Iter<'a, String, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Metadata {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Metadata(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl From<BTreeMap<String, String>> for Metadata {
    fn from(map: BTreeMap<String, String>) -> Self {
        Metadata(map)
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v:?}")?;
        }
        f.write_str("}")
    }
}

/// Conversion between a typed descriptor and the flat [`Metadata`] mapping.
///
/// Decoding is total: missing or malformed entries take their documented
/// defaults instead of failing.
pub trait MetadataCodec: Sized {
    /// Writes the descriptor's reserved keys into a fresh mapping.
    fn encode(&self) -> Metadata;

    /// Reads the descriptor back, defaulting anything missing.
    fn decode(metadata: &Metadata) -> Self;

    /// Writes the reserved keys over `metadata`, replacing colliding entries
    /// and keeping the rest.
    fn encode_into(&self, metadata: &mut Metadata) {
        metadata.extend(self.encode());
    }
}
