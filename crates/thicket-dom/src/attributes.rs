//! Attribute storage for tag nodes.
//!
//! An [`AttributeCollection`] is keyed by attribute name. Names are unique
//! within a collection and iteration is in name-sorted order, which also
//! fixes the order attributes are serialized in.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

/// Quote character used when none was recorded from the source.
pub const DEFAULT_QUOTE: char = '"';

/// A single `name="value"` pair on a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, as written in the source.
    pub name: String,
    /// Raw attribute value; empty for valueless attributes such as `disabled`.
    pub value: String,
    /// Quote character wrapped around the value when serialized.
    pub quote: char,
}

impl Attribute {
    /// Create an attribute quoted with [`DEFAULT_QUOTE`].
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_quote(name, value, DEFAULT_QUOTE)
    }

    /// Create an attribute with an explicit quote character.
    #[must_use]
    pub fn with_quote(name: impl Into<String>, value: impl Into<String>, quote: char) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quote,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}={q}{}{q}", self.name, self.value, q = self.quote)
        }
    }
}

/// The attributes of one tag, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeCollection {
    entries: BTreeMap<String, Attribute>,
}

impl AttributeCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert `attribute` unless an attribute with the same name is already
    /// present (the first occurrence wins). Returns `self` for chaining.
    pub fn add(&mut self, attribute: Attribute) -> &mut Self {
        if let Entry::Vacant(slot) = self.entries.entry(attribute.name.clone()) {
            let _ = slot.insert(attribute);
        }
        self
    }

    /// Update the value of `name`, or insert it with the default quote.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        match self.entries.get_mut(name) {
            Some(existing) => existing.value = value.into(),
            None => {
                let _ = self
                    .entries
                    .insert(name.to_string(), Attribute::new(name, value));
            }
        }
    }

    /// Overwrite-or-insert every attribute of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for attribute in other.iter() {
            let _ = self
                .entries
                .insert(attribute.name.clone(), attribute.clone());
        }
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries.get(name)
    }

    /// Shorthand for the value of the named attribute.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|attribute| attribute.value.as_str())
    }

    /// Whether an attribute with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove and return the named attribute.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.entries.remove(name)
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Attribute> for AttributeCollection {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut collection = Self::new();
        for attribute in iter {
            let _ = collection.add(attribute);
        }
        collection
    }
}

impl fmt::Display for AttributeCollection {
    /// `name="value"` pairs separated by single spaces; empty values print
    /// the bare name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attribute) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}
