//! Key → color assignments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::registry::Category;
use crate::{AnnotateError, AnnotateResult};

/// Colors for every key of every category.
///
/// Lookups are by key alone, independent of category, so keys of different
/// categories share one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable {
    colors: HashMap<String, String>,
}

impl ColorTable {
    /// An empty table. Every lookup fails until colors are set.
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// Registry default colors for all keys of all categories.
    pub fn defaults() -> Self {
        let colors = Category::ALL
            .iter()
            .flat_map(|c| c.keys())
            .map(|k| (k.key.to_string(), k.color.to_string()))
            .collect();
        Self { colors }
    }

    /// Defaults with the given overrides applied.
    ///
    /// Overrides for keys outside the registry are kept but logged, since
    /// no extractor will ever ask for them.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut table = Self::defaults();
        for (key, color) in overrides {
            if !table.colors.contains_key(key) {
                tracing::warn!(key = %key, "color override for unknown key");
            }
            table.set(key.clone(), color.clone());
        }
        table
    }

    /// Assigns a color to a key.
    pub fn set(&mut self, key: impl Into<String>, color: impl Into<String>) {
        self.colors.insert(key.into(), color.into());
    }

    /// Removes a key's color.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.colors.remove(key)
    }

    /// Color of a key, failing if none was assigned.
    pub fn get(&self, key: &str) -> AnnotateResult<&str> {
        self.colors
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| AnnotateError::MissingColor(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Whether a string is a CSS-style hex color (`#rgb`, `#rgba`, `#rrggbb` or
/// `#rrggbbaa`).
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Parses a hex color into RGB, dropping any alpha channel.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    if !is_hex_color(color) {
        return None;
    }
    let digits = &color[1..];
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 | 4 => {
            // Short form: each digit is doubled
            let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?))
        }
        _ => Some((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
    }
}
