//! # Dispatcher
//!
//! ```text
//! callback ──> validate shape ──> Shape { descriptor, mode }
//!                                        |
//! items ──> satisfies(item, descriptor) ─┤
//!                                        v
//!                 Single: call once per match, stop on first relayed error
//!                 Batch:  call once with all matches (possibly none)
//! ```
//!
//! Validation errors are returned before any element is inspected. After
//! that, only the callback's own error can make a dispatch fail.
//!
//! The typed entry points ([`filter`], [`filter_slice`]) take closures and
//! build the [`Func`] themselves. The erased ones ([`filter_dyn`],
//! [`filter_slice_dyn`]) take any element and check that it is callable.
//! Every entry point accepts trailing [`FilterOption`]s; the `_with` forms
//! expose them for typed callbacks.

use alloc::vec::Vec;

use crate::callback::{Argument, Func, Outcome};
use crate::capability::Capability;
use crate::collection::Item;
use crate::element::Element;
use crate::error::{BoxError, FilterError, InvalidCallback, Result};
use crate::matcher::satisfies;
use crate::shape::{self, Mode};

// =============================================================================
// Options
// =============================================================================

mod private {
    pub trait Sealed {}
}

/// Modifies the behavior of a dispatch.
///
/// Reserved: no options exist yet, and the trait is sealed.
pub trait FilterOption: private::Sealed {}

// =============================================================================
// Entry Points
// =============================================================================

/// Call `callback` once for every element of `items` providing `C`, in
/// order. Stops at the first error the callback returns.
///
/// ```
/// use std::fmt::Display;
/// use tola_filter::{collection, dispatch, Nil};
///
/// let items = collection![1_u8, Nil, (), "two"];
/// let mut shown = Vec::new();
/// dispatch::filter::<dyn Display, _>(&items, |value| shown.push(value.to_string())).unwrap();
/// assert_eq!(shown, ["1", "two"]);
/// ```
pub fn filter<C, R>(items: &[Item], callback: impl FnMut(&C) -> R) -> Result<()>
where
    C: ?Sized + Capability,
    R: Outcome,
{
    filter_with(items, callback, &[])
}

/// [`filter`] with options.
pub fn filter_with<C, R>(
    items: &[Item],
    callback: impl FnMut(&C) -> R,
    options: &[&dyn FilterOption],
) -> Result<()>
where
    C: ?Sized + Capability,
    R: Outcome,
{
    run(items, &mut Func::single(callback), Mode::Single, options)
}

/// Call `callback` exactly once with every element of `items` providing
/// `C`, in order. The slice may be empty.
pub fn filter_slice<C, R>(items: &[Item], callback: impl FnMut(&[&C]) -> R) -> Result<()>
where
    C: ?Sized + Capability,
    R: Outcome,
{
    filter_slice_with(items, callback, &[])
}

/// [`filter_slice`] with options.
pub fn filter_slice_with<C, R>(
    items: &[Item],
    callback: impl FnMut(&[&C]) -> R,
    options: &[&dyn FilterOption],
) -> Result<()>
where
    C: ?Sized + Capability,
    R: Outcome,
{
    run(items, &mut Func::batch(callback), Mode::Batch, options)
}

/// [`filter`] for an erased callback, which must be a [`Func`] taking one
/// `&dyn C`.
pub fn filter_dyn(items: &[Item], callback: Item, options: &[&dyn FilterOption]) -> Result<()> {
    run(items, &mut shape::callable(callback).inspect_err(rejected)?, Mode::Single, options)
}

/// [`filter_slice`] for an erased callback, which must be a [`Func`] taking
/// one `&[&dyn C]`.
pub fn filter_slice_dyn(items: &[Item], callback: Item, options: &[&dyn FilterOption]) -> Result<()> {
    run(items, &mut shape::callable(callback).inspect_err(rejected)?, Mode::Batch, options)
}

// =============================================================================
// Core
// =============================================================================

fn run(items: &[Item], callback: &mut Func<'_>, mode: Mode, options: &[&dyn FilterOption]) -> Result<()> {
    let shape = shape::validate(callback.signature(), mode).inspect_err(rejected)?;
    log::trace!(
        "filter: {} callback `{}` for {} over {} elements ({} options)",
        shape.mode,
        callback.signature(),
        shape.descriptor,
        items.len(),
        options.len()
    );

    let matches = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| Some((index, item.as_deref()?)))
        .filter(|(_, element)| satisfies(Some(*element), &shape.descriptor));

    match shape.mode {
        Mode::Single => {
            for (index, element) in matches {
                log::trace!("filter: invoking callback with element #{index} ({})", element.type_name());
                if let Some(err) = relay(callback, Argument::One(element)) {
                    return Err(FilterError::Callback(err));
                }
            }
        }
        Mode::Batch => {
            let batch: Vec<&dyn Element> = matches.map(|(_, element)| element).collect();
            log::trace!("filter: invoking callback with {} of {} elements", batch.len(), items.len());
            if let Some(err) = relay(callback, Argument::Batch(&batch)) {
                return Err(FilterError::Callback(err));
            }
        }
    }
    Ok(())
}

/// Invoke `callback`, keeping the returned error only when the declared
/// return type is error-capable.
fn relay(callback: &mut Func<'_>, argument: Argument<'_>) -> Option<BoxError> {
    let returned = callback.call(argument);
    match callback.signature().returns() {
        Some(returns) if returns.is_error() => returned,
        _ => None,
    }
}

fn rejected(err: &InvalidCallback) {
    log::debug!("filter: rejected callback: {err}");
}
