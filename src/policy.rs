//! Child value policies.
//!
//! Every node keeps one policy object that watches the values of its direct
//! children. The engine consults it before any structural change and keeps it
//! informed after each one.

use core::fmt;
use core::hash::Hash;

use std::collections::HashSet;

use crate::node::InvalidElement;

/// Rules on the values of the direct children of a node.
///
/// `None` stands for a child without a value.
pub trait ChildPolicy<T>: Default {
    /// Whether [`may_contain`][`Self::may_contain`] is an exact membership
    /// test rather than a filter.
    ///
    /// When this is true, a positive pre-check over the whole child list is
    /// trusted without scanning the children.
    const EXACT: bool = false;

    /// Returns `false` if no child can carry the value.
    ///
    /// Returning `true` means only that a linear scan is required.
    #[must_use]
    fn may_contain(&self, value: Option<&T>) -> bool;

    /// Checks whether a new child carrying the value may be attached.
    fn validate(&self, value: Option<&T>) -> Result<(), InvalidElement> {
        let _ = value;
        Ok(())
    }

    /// Checks whether new children carrying the values may be attached at once.
    fn validate_batch(&self, values: &[Option<&T>]) -> Result<(), InvalidElement> {
        values.iter().try_for_each(|value| self.validate(*value))
    }

    /// Checks whether the value of one child may be changed from `old` to `new`.
    fn validate_replacement(&self, old: Option<&T>, new: Option<&T>) -> Result<(), InvalidElement> {
        let _ = old;
        self.validate(new)
    }

    /// Records that a child carrying the value was attached.
    fn on_attach(&mut self, value: Option<&T>) {
        let _ = value;
    }

    /// Records that a child carrying the value was detached.
    fn on_detach(&mut self, value: Option<&T>) {
        let _ = value;
    }

    /// Records that the value of a child changed from `old` to `new`.
    fn on_value_replaced(&mut self, old: Option<&T>, new: Option<&T>) {
        self.on_detach(old);
        self.on_attach(new);
    }
}

/// No constraint on child values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plain;

impl<T> ChildPolicy<T> for Plain {
    #[inline]
    fn may_contain(&self, _value: Option<&T>) -> bool {
        true
    }
}

/// Values of siblings are unique.
///
/// At most one child may have no value, and no two children may have equal
/// values.
pub struct Unique<T> {
    /// Values of the children that have one.
    values: HashSet<T>,
    /// Whether a child without a value exists.
    holds_empty: bool,
}

impl<T> Default for Unique<T> {
    #[inline]
    fn default() -> Self {
        Self {
            values: HashSet::new(),
            holds_empty: false,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Unique<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unique")
            .field("values", &self.values)
            .field("holds_empty", &self.holds_empty)
            .finish()
    }
}

impl<T> Unique<T> {
    /// Returns the number of tracked values, counting the empty one.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() + usize::from(self.holds_empty)
    }

    /// Returns true if no child is tracked.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && !self.holds_empty
    }

    /// Returns true if a child without a value is tracked.
    #[inline]
    #[must_use]
    pub fn holds_empty(&self) -> bool {
        self.holds_empty
    }

    /// Returns an iterator of the tracked values.
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.values.iter()
    }
}

impl<T: Eq + Hash + Clone> ChildPolicy<T> for Unique<T> {
    const EXACT: bool = true;

    fn may_contain(&self, value: Option<&T>) -> bool {
        match value {
            None => self.holds_empty,
            Some(value) => self.values.contains(value),
        }
    }

    fn validate(&self, value: Option<&T>) -> Result<(), InvalidElement> {
        if self.may_contain(value) {
            return Err(InvalidElement::DuplicateValue);
        }
        Ok(())
    }

    fn validate_batch(&self, values: &[Option<&T>]) -> Result<(), InvalidElement> {
        let mut seen = HashSet::with_capacity(values.len());
        let mut seen_empty = false;
        for value in values {
            self.validate(*value)?;
            let is_new = match value {
                None => !core::mem::replace(&mut seen_empty, true),
                Some(value) => seen.insert(*value),
            };
            if !is_new {
                return Err(InvalidElement::DuplicateInBatch);
            }
        }
        Ok(())
    }

    fn validate_replacement(&self, old: Option<&T>, new: Option<&T>) -> Result<(), InvalidElement> {
        if old == new {
            return Ok(());
        }
        self.validate(new)
    }

    fn on_attach(&mut self, value: Option<&T>) {
        match value {
            None => self.holds_empty = true,
            Some(value) => {
                self.values.insert(value.clone());
            }
        }
    }

    fn on_detach(&mut self, value: Option<&T>) {
        match value {
            None => self.holds_empty = false,
            Some(value) => {
                self.values.remove(value);
            }
        }
    }
}
