//! Attribute mapping
//!
//! Stored as an insertion-ordered list of name/value pairs. Equality ignores
//! order; the serializer emits attributes in iteration order.

/// Name/value attribute mapping of one element
#[derive(Debug, Clone, Default, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty mapping
    pub fn new() -> Self {
        Attributes {
            entries: Vec::new(),
        }
    }

    /// Number of attributes
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no attributes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check if an attribute is present
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Set an attribute; an existing key keeps its position
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Merge `other` into this mapping; values from `other` win
    pub fn merge<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in other {
            self.insert(name, value);
        }
    }

    /// Iterate over (name, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.get(name) == Some(value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        attrs.merge(iter);
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        attrs.insert("a", "3");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let left: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        let right: Attributes = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(left, right);

        let other: Attributes = [("a", "1"), ("b", "3")].into_iter().collect();
        assert_ne!(left, other);
    }

    #[test]
    fn test_merge_and_remove() {
        let mut attrs: Attributes = [("x", "1")].into_iter().collect();
        attrs.merge([("y", "2"), ("x", "9")]);
        assert_eq!(attrs.get("x"), Some("9"));
        assert_eq!(attrs.remove("x"), Some("9".to_string()));
        assert_eq!(attrs.remove("x"), None);
        assert_eq!(attrs.len(), 1);
    }
}
