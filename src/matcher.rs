//! Capability matching.
//!
//! `None` is the only absence of value an element slot can hold, and it never
//! satisfies a capability, not even the universal `dyn Any`.

use core::any::Any;

use crate::capability::{Capability, Caster, Descriptor};
use crate::element::{Element, Request};

/// Whether `value` provides `capability`.
///
/// Agrees with [`cast`]: an element whose first caster for the capability
/// rejects it does not satisfy the capability.
pub fn satisfies(value: Option<&dyn Element>, capability: &Descriptor) -> bool {
    let Some(element) = value else {
        return false;
    };
    if capability.is_universal() {
        return true;
    }
    let mut request = Request::check(capability.id(), element.as_any());
    element.provide(&mut request);
    request.is_found()
}

/// View `element` through capability `C`, if its concrete type provides it.
pub fn cast<C: ?Sized + Capability>(element: &dyn Element) -> Option<&C> {
    let mut slot: Option<Caster<C>> = None;
    let mut request = Request::fill(&mut slot);
    request.provide::<dyn Any>(Caster::new(|any| Some(any)));
    element.provide(&mut request);
    slot.and_then(|caster| caster.cast(element.as_any()))
}
