// ── Guid ──
//
// Opaque identifier assigned by the Cloud Controller. Compared by exact
// string equality; never parsed.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(String);

impl Guid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets `HashMap<Guid, _>` be queried with a plain `&str`.
impl Borrow<str> for Guid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Guid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Guid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Guid {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Guid::from("si-1"), 1);
        assert_eq!(map.get("si-1"), Some(&1));
        assert_eq!(map.get("SI-1"), None);
    }

    #[test]
    fn serializes_as_bare_string() {
        let json = serde_json::to_string(&Guid::from("abc")).unwrap_or_default();
        assert_eq!(json, "\"abc\"");
    }
}
