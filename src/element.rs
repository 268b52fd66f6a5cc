//! # Elements
//!
//! An [`Element`] is a type-erased value that can tell, at runtime, which
//! capabilities its concrete type provides.
//!
//! The protocol is a small request/provide handshake:
//!
//! 1. The matcher builds a [`Request`] for one capability `TypeId`.
//! 2. [`Element::provide`] offers a [`Caster`] for every capability the type
//!    provides.
//! 3. The request keeps the first offer whose capability matches, and only
//!    counts it as found when that caster accepts the element.
//!
//! Types declare capabilities with `#[derive(Element)]` and
//! `#[element(TraitA, TraitB)]`, or with [`impl_element!`]. Both also offer
//! `Debug`, `Display` and `Error` when a concrete type implements them.

use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::capability::{Capability, Caster};

// =============================================================================
// AsAny
// =============================================================================

/// Erasure helpers, implemented for every `'static` type.
///
/// Call these through `&dyn Element`, never through `Box<dyn Element>`:
/// the box is itself `'static` and would answer for itself.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Name of the concrete type behind the erased value.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

// =============================================================================
// Element
// =============================================================================

/// A value that can be filtered by capability.
pub trait Element: AsAny {
    /// Offer a [`Caster`] for each capability this type provides.
    fn provide(&self, request: &mut Request<'_>);
}

/// A pending capability lookup, answered by [`Element::provide`].
pub struct Request<'r> {
    wanted: TypeId,
    target: Option<&'r dyn Any>,
    slot: Option<&'r mut dyn Any>,
    offered: bool,
    found: bool,
}

impl<'r> Request<'r> {
    /// Record whether the first caster offered for `wanted` accepts
    /// `target`.
    pub(crate) fn check(wanted: TypeId, target: &'r dyn Any) -> Self {
        Request {
            wanted,
            target: Some(target),
            slot: None,
            offered: false,
            found: false,
        }
    }

    /// Record the caster for `C` into `slot`.
    pub(crate) fn fill<C: ?Sized + Capability>(slot: &'r mut Option<Caster<C>>) -> Self {
        Request {
            wanted: TypeId::of::<C>(),
            target: None,
            slot: Some(slot),
            offered: false,
            found: false,
        }
    }

    /// `TypeId` of the capability being looked up.
    pub fn wanted(&self) -> TypeId {
        self.wanted
    }

    pub(crate) fn is_found(&self) -> bool {
        self.found
    }

    /// Offer capability `C`. Ignored unless `C` is the wanted capability
    /// and nothing was offered for it yet.
    pub fn provide<C: ?Sized + Capability>(&mut self, caster: Caster<C>) -> &mut Self {
        if self.offered || TypeId::of::<C>() != self.wanted {
            return self;
        }
        self.offered = true;
        self.found = match self.target {
            Some(target) => caster.cast(target).is_some(),
            None => true,
        };
        if let Some(slot) = self
            .slot
            .as_deref_mut()
            .and_then(|slot| slot.downcast_mut::<Option<Caster<C>>>())
        {
            *slot = Some(caster);
        }
        self
    }
}

// =============================================================================
// Macros
// =============================================================================

/// Implement [`Element`] for a concrete type, listing the capabilities it
/// provides.
///
/// Every listed trait must have a [`Capability`] implementation for its
/// trait object type. `Debug`, `Display` and `Error` are offered after the
/// listed ones whenever `$ty` implements them.
///
/// ```
/// use std::fmt::Debug;
/// use tola_filter::{impl_element, Collection};
///
/// #[derive(Debug)]
/// struct Celsius(f32);
///
/// impl_element!(Celsius => Debug);
///
/// let mut collection = Collection::new();
/// collection.push_value(Celsius(21.5));
///
/// let mut rendered = Vec::new();
/// collection
///     .filter::<dyn Debug, _>(|value| rendered.push(format!("{value:?}")))
///     .unwrap();
/// assert_eq!(rendered, ["Celsius(21.5)"]);
/// ```
#[macro_export]
macro_rules! impl_element {
    ($ty:ty $(=> $($cap:path),* $(,)?)?) => {
        impl $crate::Element for $ty {
            #[allow(unused_variables)]
            fn provide(&self, request: &mut $crate::Request<'_>) {
                $($(
                    request.provide::<dyn $cap + 'static>($crate::Caster::<dyn $cap + 'static>::new(|any| {
                        any.downcast_ref::<$ty>().map(|value| value as &(dyn $cap + 'static))
                    }));
                )*)?
                $crate::__offer_detected!(request, $ty);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_capability;

    trait Loud {
        fn shout(&self) -> &'static str;
    }

    trait Quiet {}

    impl_capability!(dyn Loud => "fn shout(&self) -> &'static str");
    impl_capability!(dyn Quiet);

    struct Horn;

    impl Loud for Horn {
        fn shout(&self) -> &'static str {
            "HONK"
        }
    }

    impl_element!(Horn => Loud);

    fn loud_caster() -> Caster<dyn Loud> {
        Caster::new(|any| any.downcast_ref::<Horn>().map(|value| value as &(dyn Loud + 'static)))
    }

    /// Offers `dyn Loud` with a caster that never accepts.
    struct Mute;

    impl Element for Mute {
        fn provide(&self, request: &mut Request<'_>) {
            request.provide(Caster::<dyn Loud>::new(|_| None)).provide(loud_caster());
        }
    }

    #[test]
    fn test_check_records_match_only() {
        let mut request = Request::check(TypeId::of::<dyn Loud>(), &Horn);
        Horn.provide(&mut request);
        assert!(request.is_found());

        let mut request = Request::check(TypeId::of::<dyn Quiet>(), &Horn);
        Horn.provide(&mut request);
        assert!(!request.is_found());
    }

    #[test]
    fn test_check_runs_first_caster() {
        let mut request = Request::check(TypeId::of::<dyn Loud>(), &Mute);
        Mute.provide(&mut request);
        assert!(!request.is_found());
    }

    #[test]
    fn test_detected_std_traits() {
        #[derive(Debug)]
        struct Gauge;
        impl_element!(Gauge);

        let mut slot: Option<Caster<dyn core::fmt::Debug>> = None;
        Gauge.provide(&mut Request::fill(&mut slot));
        assert!(slot.is_some_and(|caster| caster.cast(&Gauge).is_some()));

        let mut request = Request::check(TypeId::of::<dyn core::fmt::Display>(), &Gauge);
        Gauge.provide(&mut request);
        assert!(!request.is_found());
    }

    #[test]
    fn test_fill_stores_caster() {
        let mut slot: Option<Caster<dyn Loud>> = None;
        let mut request = Request::fill(&mut slot);
        assert_eq!(request.wanted(), TypeId::of::<dyn Loud>());
        Horn.provide(&mut request);
        assert!(request.is_found());

        let horn = Horn;
        let loud = slot.and_then(|caster| caster.cast(horn.as_any()));
        assert_eq!(loud.map(|l| l.shout()), Some("HONK"));
    }

    #[test]
    fn test_first_offer_wins() {
        let mut slot: Option<Caster<dyn Loud>> = None;
        let mut request = Request::fill(&mut slot);
        request
            .provide(loud_caster())
            .provide(Caster::<dyn Loud>::new(|_| None));
        assert!(slot.is_some_and(|caster| caster.cast(&Horn).is_some()));
    }

    #[test]
    fn test_type_name_through_dyn() {
        let element: &dyn Element = &Horn;
        assert!(element.type_name().ends_with("Horn"));
        assert!(element.as_any().is::<Horn>());
    }
}
