//! Typed field paths
//!
//! A path is a sequence of segments: named keys for fields and groups, and
//! integer indices for instances of a repeated group. `invite[1].email`
//! addresses the `email` field of the second `invite` row.

use super::FormError;
use std::fmt;
use std::str::FromStr;

/// One step in a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Structured address of a field (or group) inside a form
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, addressing the form root
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to a repeated-group child: `group[index].field`
    pub fn repeated(group: &str, index: usize, field: &str) -> Self {
        Self::root().key(group).index(index).key(field)
    }

    /// Append a named segment
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an instance index
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The trailing key, if the path ends in one
    pub fn last_key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Accepts both `invite[1].email` and the dotted `invite.1.email` form.
/// Purely numeric dotted components are read as indices.
impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormError::InvalidPath(s.to_string());
        if s.trim().is_empty() {
            return Err(invalid());
        }

        let mut path = FieldPath::root();
        for part in s.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };

            if name.is_empty() && rest.is_empty() {
                return Err(invalid());
            }
            if !name.is_empty() {
                path = match name.parse::<usize>() {
                    Ok(index) => path.index(index),
                    Err(_) => path.key(name),
                };
            }

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(invalid)?;
                let index = rest[1..close].parse::<usize>().map_err(|_| invalid())?;
                path = path.index(index);
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid());
                }
            }
        }

        if path.is_root() {
            return Err(invalid());
        }
        Ok(path)
    }
}
