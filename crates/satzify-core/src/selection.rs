//! Which keys the user wants highlighted.

use std::collections::{HashMap, HashSet};

use crate::registry::Category;
use crate::{AnnotateError, AnnotateResult};

/// The active keys of one category.
pub type ActiveKeys = HashSet<String>;

/// Per-category sets of active keys for one rendering pass.
///
/// Only registry keys can be active. Categories without an explicit
/// selection have every key active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    active: HashMap<Category, ActiveKeys>,
}

impl Selection {
    /// Every key of every category active.
    pub fn all() -> Self {
        let active = Category::ALL
            .into_iter()
            .map(|c| (c, c.keys().iter().map(|k| k.key.to_string()).collect()))
            .collect();
        Self { active }
    }

    /// Nothing active.
    pub fn none() -> Self {
        let active = Category::ALL.into_iter().map(|c| (c, ActiveKeys::new())).collect();
        Self { active }
    }

    /// Replaces a category's active keys, ignoring keys not in the registry.
    ///
    /// Returns the ignored keys.
    pub fn set_keys<S: AsRef<str>>(
        &mut self,
        category: Category,
        keys: impl IntoIterator<Item = S>,
    ) -> Vec<String> {
        let mut accepted = ActiveKeys::new();
        let mut ignored = Vec::new();
        for key in keys {
            let key = key.as_ref();
            if category.get(key).is_some() {
                accepted.insert(key.to_string());
            } else {
                tracing::warn!(%category, key, "ignoring unknown key");
                ignored.push(key.to_string());
            }
        }
        self.active.insert(category, accepted);
        ignored
    }

    /// Like [`Selection::set_keys`], but fails on the first unknown key and
    /// leaves the selection unchanged.
    pub fn try_set_keys<S: AsRef<str>>(
        &mut self,
        category: Category,
        keys: impl IntoIterator<Item = S>,
    ) -> AnnotateResult<()> {
        let mut accepted = ActiveKeys::new();
        for key in keys {
            let key = key.as_ref();
            if category.get(key).is_none() {
                return Err(AnnotateError::UnknownKey {
                    category,
                    key: key.to_string(),
                });
            }
            accepted.insert(key.to_string());
        }
        self.active.insert(category, accepted);
        Ok(())
    }

    /// Activates keys by display name (e.g. "Noun").
    pub fn set_names<S: AsRef<str>>(&mut self, category: Category, names: &[S]) {
        let keys = category.names_to_keys(names);
        self.set_keys(category, keys);
    }

    /// Activates a single key. Returns `false` for keys outside the registry.
    pub fn insert(&mut self, category: Category, key: &str) -> bool {
        if category.get(key).is_none() {
            return false;
        }
        self.active
            .entry(category)
            .or_default()
            .insert(key.to_string());
        true
    }

    /// Deactivates a single key.
    pub fn remove(&mut self, category: Category, key: &str) -> bool {
        self.active
            .get_mut(&category)
            .is_some_and(|keys| keys.remove(key))
    }

    /// The active keys of a category.
    pub fn keys(&self, category: Category) -> &ActiveKeys {
        static EMPTY: std::sync::LazyLock<ActiveKeys> = std::sync::LazyLock::new(ActiveKeys::new);
        self.active.get(&category).unwrap_or(&*EMPTY)
    }

    pub fn is_active(&self, category: Category, key: &str) -> bool {
        self.keys(category).contains(key)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}
