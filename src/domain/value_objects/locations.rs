//! Location placeholders
//!
//! Packages rarely know where the consuming project keeps its document root,
//! so mappings may say `[web-root]/robots.txt` and let the project decide.

use std::collections::BTreeMap;

use super::path::{normalize_relative, PathError};

/// Named, validated location prefixes (`web-root` → `web`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locations(BTreeMap<String, String>);

impl Locations {
    /// Validate every location value; each must be a safe relative path.
    /// `.` or an empty value maps a location onto the project root.
    pub fn new(map: BTreeMap<String, String>) -> Result<Self, PathError> {
        let mut normalized = BTreeMap::new();
        for (name, value) in map {
            normalized.insert(name, normalize_relative(&value)?);
        }
        Ok(Self(normalized))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace every `[name]` token in `raw` with its location.
    pub fn expand(&self, raw: &str) -> Result<String, PathError> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(start) = rest.find('[') {
            let Some(len) = rest[start..].find(']') else {
                break;
            };
            let name = &rest[start + 1..start + len];
            let value = self.get(name).ok_or_else(|| PathError::UnknownLocation {
                name: name.to_string(),
            })?;
            out.push_str(&rest[..start]);
            out.push_str(value);
            rest = &rest[start + len + 1..];
            if value.is_empty() {
                rest = rest.trim_start_matches(['/', '\\']);
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}
