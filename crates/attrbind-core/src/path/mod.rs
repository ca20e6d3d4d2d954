
use std::fmt;

///
/// PathStep
///
/// One hop from a value to one of its children.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PathStep {
    /// Named attribute of an object.
    AttributeName(String),
    /// Position inside a list.
    ElementIndex(usize),
    /// Key inside a map.
    ElementKey(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeName(name) => f.write_str(name),
            Self::ElementIndex(index) => write!(f, "[{index}]"),
            Self::ElementKey(key) => write!(f, "[{key:?}]"),
        }
    }
}

///
/// Path
///
/// Immutable location inside a value tree. Every `with_*` call returns a
/// new path; the receiver is never modified.
///

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The empty path addressing the root value.
    #[must_use]
    pub const fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// Return a new path with `step` appended.
    #[must_use]
    pub fn with_step(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);

        Self { steps }
    }

    #[must_use]
    pub fn with_attribute_name(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::AttributeName(name.into()))
    }

    #[must_use]
    pub fn with_element_index(&self, index: usize) -> Self {
        self.with_step(PathStep::ElementIndex(index))
    }

    #[must_use]
    pub fn with_element_key(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::ElementKey(key.into()))
    }

    /// Return a new path with every step of `other` appended.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }

        let mut steps = Vec::with_capacity(self.steps.len() + other.steps.len());
        steps.extend_from_slice(&self.steps);
        steps.extend_from_slice(&other.steps);

        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn last_step(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// The path one step closer to the root, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, head) = self.steps.split_last()?;

        Some(Self {
            steps: head.to_vec(),
        })
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

// Attribute names are dot-joined; index and key steps attach directly.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::AttributeName(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathStep::ElementIndex(_) | PathStep::ElementKey(_) => write!(f, "{step}")?,
            }
        }

        Ok(())
    }
}
