//! Callback shape validation.
//!
//! Two accepted shapes:
//!
//! | Mode | Parameter | Capability |
//! |------|-----------|------------|
//! | [`Mode::Single`] | `&dyn C` | `C` |
//! | [`Mode::Batch`] | `&[&dyn C]` | `C` |
//!
//! Checks run in a fixed order and the first violation wins.

use alloc::boxed::Box;
use alloc::format;
use core::fmt;

use crate::callback::{Func, ParamType, Signature};
use crate::capability::Descriptor;
use crate::element::Element;
use crate::error::InvalidCallback;
use crate::matcher::cast;

/// Dispatch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One invocation per matching element.
    Single,
    /// One invocation with every matching element.
    Batch,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Single => "single",
            Mode::Batch => "batch",
        })
    }
}

/// A validated callback shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub descriptor: Descriptor,
    pub mode: Mode,
}

/// Recover a [`Func`] from an erased callback value.
pub fn callable(callback: Option<Box<dyn Element>>) -> Result<Func<'static>, InvalidCallback> {
    let element = callback.ok_or(InvalidCallback::UntypedNil)?;
    let not_callable = InvalidCallback::NotCallable {
        value: describe(&*element),
        type_name: (*element).type_name(),
    };
    element
        .into_any()
        .downcast::<Func<'static>>()
        .map(|func| *func)
        .map_err(|_| not_callable)
}

/// Validate `signature` against `mode` and extract the capability it expects.
pub fn validate(signature: &Signature, mode: Mode) -> Result<Shape, InvalidCallback> {
    let [param] = signature.params() else {
        return Err(InvalidCallback::Arity(signature.arity()));
    };
    let descriptor = match (mode, param) {
        (Mode::Batch, ParamType::Sequence(element)) => match element.as_ref() {
            ParamType::Capability(descriptor) => *descriptor,
            _ => return Err(InvalidCallback::NotASliceOfCapability),
        },
        (Mode::Batch, _) => return Err(InvalidCallback::NotASlice),
        (Mode::Single, ParamType::Capability(descriptor)) => *descriptor,
        (Mode::Single, _) => return Err(InvalidCallback::NotACapability),
    };
    Ok(Shape { descriptor, mode })
}

fn describe(element: &dyn Element) -> alloc::string::String {
    match cast::<dyn fmt::Debug>(element) {
        Some(value) => format!("{value:?}"),
        None => "_".into(),
    }
}
