//! Std trait detection on concrete types.
//!
//! For each detected trait `T`:
//! 1. A fallback trait holds `const CASTER: Option<Caster<dyn T>> = None`.
//! 2. It is implemented for `Detect<X>` for every `X`.
//! 3. An inherent const holding `Some(caster)` exists for `Detect<X>` where
//!    `X: T`.
//!
//! Resolving `Detect::<Concrete>::DEBUG` picks the inherent const when
//! `Concrete: Debug` and the trait const otherwise.
//!
//! ## Limitation
//!
//! This only works for **concrete types** known at the expansion site.
//! Inside `impl<T> ...` the bound cannot be proven and the fallback wins, so
//! `#[derive(Element)]` skips detection on generic types.

use core::any::Any;
use core::error::Error;
use core::fmt::{Debug, Display};
use core::marker::PhantomData;

use crate::capability::Caster;

/// Detection wrapper type.
#[doc(hidden)]
pub struct Detect<T: ?Sized>(PhantomData<T>);

/// Generate fallback trait + inherent const for a std trait.
macro_rules! impl_detect {
    ($fallback:ident, $konst:ident, $cap:ident) => {
        #[doc(hidden)]
        pub trait $fallback {
            const $konst: Option<Caster<dyn $cap>> = None;
        }

        impl<T: ?Sized> $fallback for Detect<T> {}

        impl<T: $cap + Any> Detect<T> {
            pub const $konst: Option<Caster<dyn $cap>> = Some(Caster::new(|any| {
                any.downcast_ref::<T>().map(|value| value as &(dyn $cap + 'static))
            }));
        }
    };
}

impl_detect!(DebugFallback, DEBUG, Debug);
impl_detect!(DisplayFallback, DISPLAY, Display);
impl_detect!(ErrorFallback, ERROR, Error);

/// Offer `dyn Debug`, `dyn Display` and `dyn Error` for whichever of them the
/// concrete type `$ty` implements.
#[doc(hidden)]
#[macro_export]
macro_rules! __offer_detected {
    ($request:ident, $ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::detect::{DebugFallback as _, DisplayFallback as _, ErrorFallback as _};

        if let Some(caster) = $crate::detect::Detect::<$ty>::DEBUG {
            $request.provide(caster);
        }
        if let Some(caster) = $crate::detect::Detect::<$ty>::DISPLAY {
            $request.provide(caster);
        }
        if let Some(caster) = $crate::detect::Detect::<$ty>::ERROR {
            $request.provide(caster);
        }
    }};
}
