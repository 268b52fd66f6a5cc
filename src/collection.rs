//! # Collection
//!
//! An ordered, heterogeneous sequence of erased elements. Slots are
//! `Option<Box<dyn Element>>`; `None` is the untyped nil and never matches.
//!
//! ```
//! use std::fmt::Display;
//! use tola_filter::{collection, Nil};
//!
//! let items = collection![1_i32, Nil, "two", ()];
//! assert_eq!(items.len(), 4);
//!
//! let mut shown = Vec::new();
//! items.filter::<dyn Display, _>(|v| shown.push(v.to_string())).unwrap();
//! assert_eq!(shown, ["1", "two"]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::callback::Outcome;
use crate::capability::Capability;
use crate::dispatch::{self, FilterOption};
use crate::element::Element;
use crate::error::Result;

/// One collection slot.
pub type Item = Option<Box<dyn Element>>;

/// Ordered sequence of [`Item`]s. Derefs to `Vec<Item>`.
#[derive(Default)]
pub struct Collection(Vec<Item>);

impl Collection {
    pub const fn new() -> Self {
        Collection(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Collection(Vec::with_capacity(capacity))
    }

    /// Append a present value.
    pub fn push_value<T: Element>(&mut self, value: T) {
        self.0.push(Some(Box::new(value)));
    }

    /// Append an untyped nil.
    pub fn push_nil(&mut self) {
        self.0.push(None);
    }

    pub fn into_inner(self) -> Vec<Item> {
        self.0
    }

    /// See [`dispatch::filter`].
    pub fn filter<C, R>(&self, callback: impl FnMut(&C) -> R) -> Result<()>
    where
        C: ?Sized + Capability,
        R: Outcome,
    {
        dispatch::filter(&self.0, callback)
    }

    /// See [`dispatch::filter_with`].
    pub fn filter_with<C, R>(&self, callback: impl FnMut(&C) -> R, options: &[&dyn FilterOption]) -> Result<()>
    where
        C: ?Sized + Capability,
        R: Outcome,
    {
        dispatch::filter_with(&self.0, callback, options)
    }

    /// See [`dispatch::filter_slice`].
    pub fn filter_slice<C, R>(&self, callback: impl FnMut(&[&C]) -> R) -> Result<()>
    where
        C: ?Sized + Capability,
        R: Outcome,
    {
        dispatch::filter_slice(&self.0, callback)
    }

    /// See [`dispatch::filter_slice_with`].
    pub fn filter_slice_with<C, R>(
        &self,
        callback: impl FnMut(&[&C]) -> R,
        options: &[&dyn FilterOption],
    ) -> Result<()>
    where
        C: ?Sized + Capability,
        R: Outcome,
    {
        dispatch::filter_slice_with(&self.0, callback, options)
    }

    /// See [`dispatch::filter_dyn`].
    pub fn filter_dyn(&self, callback: Item, options: &[&dyn FilterOption]) -> Result<()> {
        dispatch::filter_dyn(&self.0, callback, options)
    }

    /// See [`dispatch::filter_slice_dyn`].
    pub fn filter_slice_dyn(&self, callback: Item, options: &[&dyn FilterOption]) -> Result<()> {
        dispatch::filter_slice_dyn(&self.0, callback, options)
    }
}

impl Deref for Collection {
    type Target = Vec<Item>;

    fn deref(&self) -> &Vec<Item> {
        &self.0
    }
}

impl DerefMut for Collection {
    fn deref_mut(&mut self) -> &mut Vec<Item> {
        &mut self.0
    }
}

impl From<Vec<Item>> for Collection {
    fn from(items: Vec<Item>) -> Self {
        Collection(items)
    }
}

impl FromIterator<Item> for Collection {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Collection(iter.into_iter().collect())
    }
}

impl Extend<Item> for Collection {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Collection {
    type Item = Item;
    type IntoIter = alloc::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|item| Slot(item.as_deref().map_or("nil", |element| element.type_name()))))
            .finish()
    }
}

struct Slot(&'static str);

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// =============================================================================
// Construction
// =============================================================================

/// The untyped nil, for use in [`collection!`](crate::collection!).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nil;

/// Conversion into a collection slot.
pub trait IntoItem {
    fn into_item(self) -> Item;
}

impl<T: Element> IntoItem for T {
    fn into_item(self) -> Item {
        Some(Box::new(self))
    }
}

impl IntoItem for Nil {
    fn into_item(self) -> Item {
        None
    }
}

/// Build a [`Collection`] from values and [`Nil`]s.
#[macro_export]
macro_rules! collection {
    () => {
        $crate::Collection::new()
    };
    ($($value:expr),+ $(,)?) => {
        <$crate::Collection as ::core::convert::From<_>>::from($crate::__private::vec![
            $($crate::IntoItem::into_item($value)),+
        ])
    };
}
