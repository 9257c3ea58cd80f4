//! Ordered option storage for choice fields.

use indexmap::IndexMap;

use crate::option::FieldOption;

/// Options keyed by their identifier, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct OptionBag {
    storage: IndexMap<String, FieldOption>,
}

impl OptionBag {
    /// Creates a new empty OptionBag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all options.
    pub fn set(&mut self, options: impl IntoIterator<Item = FieldOption>) {
        self.storage.clear();
        for option in options {
            self.add(option);
        }
    }

    /// Appends an option and returns the key it was stored under.
    ///
    /// Options whose identifier is already taken are keyed with the first
    /// free numeric suffix, starting from their position.
    pub fn add(&mut self, option: FieldOption) -> String {
        let base = option.identify();
        let mut key = base.clone();
        let mut suffix = self.storage.len();
        while self.storage.contains_key(&key) {
            key = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.storage.insert(key.clone(), option);
        key
    }

    /// Gets an option by key.
    pub fn get(&self, key: &str) -> Option<&FieldOption> {
        self.storage.get(key)
    }

    /// Gets an option by key for modification.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldOption> {
        self.storage.get_mut(key)
    }

    /// Returns whether an option is stored under the key.
    pub fn has(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    /// Removes an option, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<FieldOption> {
        self.storage.shift_remove(key)
    }

    /// Returns all options in order.
    pub fn all(&self) -> impl Iterator<Item = &FieldOption> {
        self.storage.values()
    }

    /// Returns `(key, option)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOption)> {
        self.storage.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of options.
    pub fn count(&self) -> usize {
        self.storage.len()
    }

    /// Returns whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Removes all options.
    pub fn reset(&mut self) {
        self.storage.clear();
    }
}

impl FromIterator<FieldOption> for OptionBag {
    fn from_iter<I: IntoIterator<Item = FieldOption>>(iter: I) -> Self {
        let mut bag = Self::new();
        bag.set(iter);
        bag
    }
}
