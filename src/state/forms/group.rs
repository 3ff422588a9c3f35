//! Group definitions

use super::field::FieldSpec;

/// One named entry of a [`GroupSpec`]
#[derive(Debug)]
pub enum SpecNode {
    Field(FieldSpec),
    Group(GroupSpec),
    /// Sibling instances of the same group shape, addressed by index
    Repeated(Vec<GroupSpec>),
}

/// Ordered collection of fields and nested groups
#[derive(Debug, Default)]
pub struct GroupSpec {
    entries: Vec<(String, SpecNode)>,
}

impl GroupSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf field under its own key
    pub fn field(mut self, spec: FieldSpec) -> Self {
        let key = spec.key.clone();
        self.push(key, SpecNode::Field(spec));
        self
    }

    /// Add a nested group under `key`
    pub fn group(mut self, key: &str, group: GroupSpec) -> Self {
        self.push(key.to_string(), SpecNode::Group(group));
        self
    }

    /// Add `count` sibling groups under `key`.
    ///
    /// `factory` is called once per instance with its index, so every
    /// instance owns its own field definitions.
    pub fn repeated<F>(mut self, key: &str, count: usize, factory: F) -> Self
    where
        F: Fn(usize) -> GroupSpec,
    {
        let instances = (0..count).map(factory).collect();
        self.push(key.to_string(), SpecNode::Repeated(instances));
        self
    }

    pub fn entries(&self) -> &[(String, SpecNode)] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<(String, SpecNode)> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // A later entry with the same key replaces the earlier one in place, so
    // each key maps to exactly one node.
    fn push(&mut self, key: String, node: SpecNode) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = node,
            None => self.entries.push((key, node)),
        }
    }
}
