//! Positional child storage.

use core::ops::Range;

use alloc::vec::Vec;

use crate::anchor::{Position, Span};
use crate::node::TreeError;

/// Ordered list of children addressed by [`Position`]s and [`Span`]s.
///
/// Every positional argument is bounds-checked before the list is touched,
/// so a failing call leaves the list unchanged.
#[derive(Debug)]
pub(crate) struct ChildList<E> {
    /// Items.
    items: Vec<E>,
}

impl<E> Default for ChildList<E> {
    #[inline]
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Getters.
impl<E> ChildList<E> {
    /// Returns the number of items.
    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items.
    #[inline]
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at the given offset.
    #[inline]
    #[must_use]
    pub(crate) fn get(&self, offset: usize) -> Option<&E> {
        self.items.get(offset)
    }

    /// Returns the last item.
    #[inline]
    #[must_use]
    pub(crate) fn last(&self) -> Option<&E> {
        self.items.last()
    }

    /// Returns an iterator of the items in the given offsets.
    ///
    /// The range should already be resolved by [`Self::span`].
    #[inline]
    pub(crate) fn iter_range(&self, range: Range<usize>) -> impl Iterator<Item = &E> + '_ {
        self.items[range].iter()
    }

    /// Returns an iterator of the items.
    #[inline]
    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = &E> + '_ {
        self.items.iter()
    }
}

/// Position resolution.
impl<E> ChildList<E> {
    /// Resolves the position of an existing item.
    pub(crate) fn offset(&self, pos: impl Into<Position>) -> Result<usize, TreeError> {
        let pos = pos.into();
        let len = self.len();
        pos.offset(len)
            .filter(|&offset| offset < len)
            .ok_or(TreeError::IndexOutOfRange { index: pos, len })
    }

    /// Resolves the position where a new item can be inserted.
    ///
    /// Unlike [`Self::offset`], the position just past the last item is valid.
    pub(crate) fn insertion_offset(&self, pos: impl Into<Position>) -> Result<usize, TreeError> {
        let pos = pos.into();
        let len = self.len();
        pos.offset(len)
            .filter(|&offset| offset <= len)
            .ok_or(TreeError::IndexOutOfRange { index: pos, len })
    }

    /// Resolves the span into a range of offsets.
    pub(crate) fn span(&self, span: impl Into<Span>) -> Result<Range<usize>, TreeError> {
        let len = self.len();
        span.into()
            .offsets(len)
            .map_err(|index| TreeError::IndexOutOfRange { index, len })
    }
}

/// Mutation.
impl<E> ChildList<E> {
    /// Inserts an item and returns its offset.
    pub(crate) fn insert(&mut self, pos: impl Into<Position>, item: E) -> Result<usize, TreeError> {
        let offset = self.insertion_offset(pos)?;
        self.items.insert(offset, item);
        Ok(offset)
    }

    /// Inserts items keeping their order and returns the offsets they occupy.
    pub(crate) fn insert_many<I>(
        &mut self,
        pos: impl Into<Position>,
        items: I,
    ) -> Result<Range<usize>, TreeError>
    where
        I: IntoIterator<Item = E>,
    {
        let offset = self.insertion_offset(pos)?;
        let old_len = self.len();
        self.items.splice(offset..offset, items);
        Ok(offset..(offset + self.len() - old_len))
    }

    /// Removes the item at the given position.
    pub(crate) fn remove(&mut self, pos: impl Into<Position>) -> Result<E, TreeError> {
        let offset = self.offset(pos)?;
        Ok(self.items.remove(offset))
    }

    /// Removes the items in the span, keeping their order.
    pub(crate) fn remove_span(&mut self, span: impl Into<Span>) -> Result<Vec<E>, TreeError> {
        let range = self.span(span)?;
        Ok(self.items.drain(range).collect())
    }

    /// Replaces the item at the given position and returns the old one.
    pub(crate) fn replace(&mut self, pos: impl Into<Position>, item: E) -> Result<E, TreeError> {
        let offset = self.offset(pos)?;
        Ok(core::mem::replace(&mut self.items[offset], item))
    }

    /// Moves an item from `from` to `to`, sliding the items in between by one.
    ///
    /// Returns the range of offsets whose items changed.
    pub(crate) fn move_item(
        &mut self,
        from: impl Into<Position>,
        to: impl Into<Position>,
    ) -> Result<Range<usize>, TreeError> {
        let from = self.offset(from)?;
        let to = self.offset(to)?;
        if from < to {
            self.items[from..=to].rotate_left(1);
            Ok(from..(to + 1))
        } else if to < from {
            self.items[to..=from].rotate_right(1);
            Ok(to..(from + 1))
        } else {
            Ok(from..from)
        }
    }

    /// Removes all items.
    #[inline]
    pub(crate) fn take_all(&mut self) -> Vec<E> {
        core::mem::take(&mut self.items)
    }
}
