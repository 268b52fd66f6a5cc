//! # Callbacks
//!
//! A [`Func`] is a callable that carries its own runtime [`Signature`]. The
//! dispatcher never sees the closure's static type: it validates the
//! signature, then invokes the body with an erased [`Argument`].
//!
//! ```text
//! closure: FnMut(&dyn Readable) -> Result<(), E>
//!     |  Func::single
//!     v
//! Func { signature: fn(&dyn Readable) -> Result<(), E>, body: FnMut(Argument) -> Option<BoxError> }
//! ```
//!
//! Return values go through [`Outcome`], which decides whether a returned
//! value is error-capable and extracts the error it carries.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;

use crate::capability::{Capability, Descriptor};
use crate::element::Element;
use crate::error::BoxError;
use crate::impl_element;
use crate::matcher::cast;

// =============================================================================
// Signature
// =============================================================================

/// Declared type of a callback parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// `&dyn Trait`
    Capability(Descriptor),
    /// `&[T]`
    Sequence(Box<ParamType>),
    /// `&T` for a concrete `T`
    Concrete(&'static str),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Capability(descriptor) => write!(f, "&{descriptor}"),
            ParamType::Sequence(element) => write!(f, "&[{element}]"),
            ParamType::Concrete(name) => write!(f, "&{name}"),
        }
    }
}

/// Declared return type of a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// May carry an error that should be relayed.
    Error(&'static str),
    /// A plain value, ignored by the dispatcher.
    Value(&'static str),
}

impl ReturnType {
    pub fn is_error(&self) -> bool {
        matches!(self, ReturnType::Error(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReturnType::Error(name) | ReturnType::Value(name) => name,
        }
    }
}

/// Runtime shape of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<ParamType>,
    returns: Option<ReturnType>,
}

impl Signature {
    pub fn new(params: Vec<ParamType>, returns: Option<ReturnType>) -> Self {
        Signature { params, returns }
    }

    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn returns(&self) -> Option<ReturnType> {
        self.returns
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")?;
        if let Some(returns) = self.returns {
            write!(f, " -> {}", returns.name())?;
        }
        Ok(())
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// A value a callback may return.
///
/// - `()`: no return value.
/// - `Result<T, E>` and `Option<E>`: error-capable. `Err(e)` and `Some(e)`
///   are relayed.
/// - Plain values (`bool`, numbers, strings): declared but ignored.
pub trait Outcome {
    /// Declared return type; `None` for no return value.
    fn returns() -> Option<ReturnType>;

    /// The error this value carries, if any.
    fn into_error(self) -> Option<BoxError>;
}

impl Outcome for () {
    fn returns() -> Option<ReturnType> {
        None
    }

    fn into_error(self) -> Option<BoxError> {
        None
    }
}

impl<T, E: Into<BoxError>> Outcome for Result<T, E> {
    fn returns() -> Option<ReturnType> {
        Some(ReturnType::Error(type_name::<Self>()))
    }

    fn into_error(self) -> Option<BoxError> {
        self.err().map(Into::into)
    }
}

impl<E: Into<BoxError>> Outcome for Option<E> {
    fn returns() -> Option<ReturnType> {
        Some(ReturnType::Error(type_name::<Self>()))
    }

    fn into_error(self) -> Option<BoxError> {
        self.map(Into::into)
    }
}

macro_rules! value_outcomes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Outcome for $ty {
                fn returns() -> Option<ReturnType> {
                    Some(ReturnType::Value(type_name::<$ty>()))
                }

                fn into_error(self) -> Option<BoxError> {
                    None
                }
            }
        )*
    };
}

value_outcomes!(
    bool, char,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    alloc::string::String, &'static str,
);

// =============================================================================
// Func
// =============================================================================

/// Erased argument handed to a [`Func`] body.
#[derive(Clone, Copy)]
pub enum Argument<'a> {
    /// Single mode: one matching element.
    One(&'a dyn Element),
    /// Batch mode: every matching element, in collection order.
    Batch(&'a [&'a dyn Element]),
}

type Body<'f> = Box<dyn for<'a> FnMut(Argument<'a>) -> Option<BoxError> + 'f>;

/// A callable with a runtime [`Signature`].
///
/// `Func<'static>` is an [`Element`], so it can travel through the erased
/// entry points ([`filter_dyn`](crate::dispatch::filter_dyn)) next to
/// values that are not callable at all.
pub struct Func<'f> {
    signature: Signature,
    body: Body<'f>,
}

impl<'f> Func<'f> {
    /// Build from a raw signature and body.
    ///
    /// The body receives whatever argument the dispatcher built for the
    /// validated signature; it returns the error to relay, if any.
    pub fn new(
        signature: Signature,
        body: impl for<'a> FnMut(Argument<'a>) -> Option<BoxError> + 'f,
    ) -> Self {
        Func {
            signature,
            body: Box::new(body),
        }
    }

    /// `fn(&C) -> R` for a capability `C`.
    pub fn single<C, R>(mut callback: impl FnMut(&C) -> R + 'f) -> Self
    where
        C: ?Sized + Capability,
        R: Outcome,
    {
        let signature = Signature::new(vec![ParamType::Capability(Descriptor::of::<C>())], R::returns());
        Func::new(signature, move |argument| match argument {
            Argument::One(element) => cast::<C>(element).and_then(|value| callback(value).into_error()),
            Argument::Batch(_) => None,
        })
    }

    /// `fn(&[&C]) -> R` for a capability `C`.
    pub fn batch<C, R>(mut callback: impl FnMut(&[&C]) -> R + 'f) -> Self
    where
        C: ?Sized + Capability,
        R: Outcome,
    {
        let param = ParamType::Sequence(Box::new(ParamType::Capability(Descriptor::of::<C>())));
        Func::new(Signature::new(vec![param], R::returns()), move |argument| match argument {
            Argument::Batch(elements) => {
                let batch: Vec<&C> = elements.iter().filter_map(|element| cast::<C>(*element)).collect();
                callback(batch.as_slice()).into_error()
            }
            Argument::One(_) => None,
        })
    }

    /// `fn(&T) -> R` for a concrete `T`.
    pub fn of<T: Any, R: Outcome>(mut callback: impl FnMut(&T) -> R + 'f) -> Self {
        let signature = Signature::new(vec![ParamType::Concrete(type_name::<T>())], R::returns());
        Func::new(signature, move |argument| match argument {
            Argument::One(element) => element
                .as_any()
                .downcast_ref::<T>()
                .and_then(|value| callback(value).into_error()),
            Argument::Batch(_) => None,
        })
    }

    /// `fn(&[&T]) -> R` for a concrete `T`.
    pub fn of_slice<T: Any, R: Outcome>(mut callback: impl FnMut(&[&T]) -> R + 'f) -> Self {
        let param = ParamType::Sequence(Box::new(ParamType::Concrete(type_name::<T>())));
        Func::new(Signature::new(vec![param], R::returns()), move |argument| match argument {
            Argument::Batch(elements) => {
                let batch: Vec<&T> = elements
                    .iter()
                    .filter_map(|element| element.as_any().downcast_ref::<T>())
                    .collect();
                callback(batch.as_slice()).into_error()
            }
            Argument::One(_) => None,
        })
    }

    /// `fn() -> R`.
    pub fn nullary<R: Outcome>(mut callback: impl FnMut() -> R + 'f) -> Self {
        Func::new(Signature::new(Vec::new(), R::returns()), move |_| callback().into_error())
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Run the body. The returned error is not filtered by the declared
    /// return type; the dispatcher does that.
    pub fn call(&mut self, argument: Argument<'_>) -> Option<BoxError> {
        (self.body)(argument)
    }
}

impl fmt::Debug for Func<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Func")
            .field("signature", &format_args!("{}", self.signature))
            .finish_non_exhaustive()
    }
}

impl_element!(Func<'static> => fmt::Debug);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_capability;
    use alloc::format;
    use alloc::string::{String, ToString};

    trait Tag {
        fn tag(&self) -> &'static str;
    }

    impl_capability!(dyn Tag => "fn tag(&self) -> &'static str");

    struct Red;
    struct Blue;

    impl Tag for Red {
        fn tag(&self) -> &'static str {
            "red"
        }
    }

    impl Tag for Blue {
        fn tag(&self) -> &'static str {
            "blue"
        }
    }

    impl_element!(Red => Tag);
    impl_element!(Blue => Tag);

    #[test]
    fn test_outcome_relay_rules() {
        assert_eq!(<() as Outcome>::returns(), None);
        assert!(<Result<(), String> as Outcome>::returns().is_some_and(|r| r.is_error()));
        assert!(<Option<String> as Outcome>::returns().is_some_and(|r| r.is_error()));
        assert!(<i32 as Outcome>::returns().is_some_and(|r| !r.is_error()));

        assert!(Ok::<(), String>(()).into_error().is_none());
        assert_eq!(Err::<(), _>("bad").into_error().map(|e| e.to_string()), Some("bad".into()));
        assert!(Some("bad").into_error().is_some());
        assert!(None::<String>.into_error().is_none());
        assert!(7_i32.into_error().is_none());
    }

    #[test]
    fn test_signature_display() {
        let mut seen = Vec::new();
        let func = Func::single::<dyn Tag, _>(|tag| seen.push(tag.tag()));
        let tag = Descriptor::of::<dyn Tag>();
        assert_eq!(format!("{}", func.signature()), format!("fn(&{tag})"));

        let func = Func::batch::<dyn Tag, _>(|_| Ok::<(), String>(()));
        assert_eq!(
            format!("{}", func.signature()),
            format!("fn(&[&{tag}]) -> {}", type_name::<Result<(), String>>())
        );

        let func = Func::nullary(|| 1_u8);
        assert_eq!(format!("{}", func.signature()), "fn() -> u8");
    }

    #[test]
    fn test_single_body_casts() {
        let mut seen = Vec::new();
        let mut func = Func::single::<dyn Tag, _>(|tag| seen.push(tag.tag()));
        assert!(func.call(Argument::One(&Red)).is_none());
        assert!(func.call(Argument::One(&Blue)).is_none());
        drop(func);
        assert_eq!(seen, ["red", "blue"]);
    }

    #[test]
    fn test_batch_body_collects() {
        let mut sizes = Vec::new();
        let mut func = Func::batch::<dyn Tag, _>(|tags| {
            sizes.push(tags.len());
            tags.first().map(|first| first.tag())
        });
        let elements: [&dyn Element; 2] = [&Red, &Blue];
        let relayed = func.call(Argument::Batch(&elements));
        assert_eq!(relayed.map(|e| e.to_string()), Some("red".into()));
        drop(func);
        assert_eq!(sizes, [2]);
    }

    #[test]
    fn test_concrete_bodies() {
        let mut hits = 0;
        let mut func = Func::of::<Red, _>(|_| hits += 1);
        func.call(Argument::One(&Red));
        func.call(Argument::One(&Blue));
        drop(func);
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_func_is_element() {
        let func: Func<'static> = Func::nullary(|| ());
        let element: &dyn Element = &func;
        assert!(element.as_any().is::<Func<'static>>());
        let rendered = cast::<dyn fmt::Debug>(element).map(|d| format!("{d:?}"));
        assert_eq!(rendered.as_deref(), Some("Func { signature: fn(), .. }"));
    }
}
