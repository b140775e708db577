//! Ordered storage of named sections.

use indexmap::IndexMap;

use super::section_name::SectionName;

/// Map from section name to its fragments.
///
/// Both the map and each fragment list preserve insertion order. Fragments
/// are only ever appended; repeating a name extends the existing section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: IndexMap<SectionName, Vec<String>>,
}

impl SectionMap {
    /// Creates a new empty section map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a section exists, creating it empty if needed.
    pub fn open(&mut self, name: &SectionName) {
        if !self.sections.contains_key(name) {
            self.sections.insert(name.clone(), Vec::new());
        }
    }

    /// Appends a fragment to a section, creating the section if needed.
    pub fn append(&mut self, name: &SectionName, fragment: impl Into<String>) {
        match self.sections.get_mut(name) {
            Some(fragments) => fragments.push(fragment.into()),
            None => {
                self.sections.insert(name.clone(), vec![fragment.into()]);
            }
        }
    }

    /// Checks if a section exists, even an empty one.
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Returns the stored key for a name.
    pub fn name(&self, name: &str) -> Option<&SectionName> {
        self.sections.get_key_value(name).map(|(key, _)| key)
    }

    /// Returns the fragments of a section.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sections.get(name).map(Vec::as_slice)
    }

    /// Joins the fragments of a section with single newlines.
    pub fn concatenate(&self, name: &str) -> Option<String> {
        self.sections.get(name).map(|fragments| fragments.join("\n"))
    }

    /// Returns all section names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &SectionName> {
        self.sections.keys()
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
