//! Map and helper traits for mailcap fields.
//!
//! Field names are case-insensitive. The [`KeyMap`] alias (backed by
//! [`indexmap::IndexMap`]) keeps fields in the order they were written, and
//! [`Addable`] stores each field under its normalized name.

use indexmap::IndexMap;
use super::Field;

/// Alias to reduce coupling with map implementation
pub type KeyMap<V> = IndexMap<String, V>;

/// Convenience trait to assure consistency between map key and name attribute of stored element.
pub trait Addable<V: Key> {
    /// Takes a value that provides a key and stores it under that key.
    ///
    /// A later value with the same key replaces the earlier one but keeps its position.
    fn add(&mut self, new_value: V);
}

impl<V: Key> Addable<V> for KeyMap<V> {
    fn add(&mut self, value: V) {
        self.insert(value.get_key(), value);
    }
}

/// Convenience trait to assure consistency between the key used for storage and the name of the element.
pub trait Key {
    /// Returns a key under which the element should be stored in a key-value store.
    fn get_key(&self) -> String;
}

impl Key for Field {
    fn get_key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}
