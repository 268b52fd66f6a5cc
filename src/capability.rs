//! # Capabilities
//!
//! A capability is a trait used as a trait object (`dyn Trait`). The
//! [`Capability`] trait is implemented for that trait object type and gives
//! the dispatcher a runtime [`Descriptor`]: identity, name, and the list of
//! operations the trait requires.
//!
//! ```text
//! #[capability] trait Readable { .. }
//!        |
//!        v
//! impl Capability for dyn Readable      -> Descriptor { TypeId, "crate::Readable", ["fn read(&self) -> ..."] }
//!
//! #[derive(Element)] #[element(Readable)] struct File;
//!        |
//!        v
//! File::provide(request) hands Caster<dyn Readable> to the request
//! ```
//!
//! A [`Caster`] is the bridge back from the erased world: a plain function
//! pointer that turns `&dyn Any` into `&C` when the concrete type matches.

use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// =============================================================================
// Capability Trait
// =============================================================================

/// A trait usable as an abstract capability.
///
/// Implemented for trait object types (`dyn Trait`), usually through
/// [`#[capability]`](macro@crate::capability) on the trait definition or
/// [`impl_capability!`] for traits declared elsewhere.
pub trait Capability: 'static {
    /// Trait name. `#[capability]` qualifies it with the module path.
    const NAME: &'static str;

    /// Rendered signatures of the operations the trait requires.
    const OPERATIONS: &'static [&'static str];

    /// Runtime descriptor of this capability.
    fn descriptor() -> Descriptor {
        Descriptor::of::<Self>()
    }
}

// =============================================================================
// Descriptor
// =============================================================================

/// Runtime description of a capability.
///
/// Two descriptors are equal when they describe the same trait object type.
#[derive(Clone, Copy)]
pub struct Descriptor {
    id: TypeId,
    name: &'static str,
    operations: &'static [&'static str],
}

impl Descriptor {
    pub fn of<C: ?Sized + Capability>() -> Self {
        Descriptor {
            id: TypeId::of::<C>(),
            name: C::NAME,
            operations: C::OPERATIONS,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn operations(&self) -> &'static [&'static str] {
        self.operations
    }

    /// `dyn Any`: satisfied by every present value.
    pub fn is_universal(&self) -> bool {
        self.id == TypeId::of::<dyn Any>()
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("operations", &self.operations)
            .finish()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn {}", self.name)
    }
}

// =============================================================================
// Caster
// =============================================================================

/// Recovers `&C` from an erased value whose concrete type provides `C`.
pub struct Caster<C: ?Sized + 'static> {
    cast: for<'a> fn(&'a dyn Any) -> Option<&'a C>,
}

impl<C: ?Sized + 'static> Caster<C> {
    pub const fn new(cast: for<'a> fn(&'a dyn Any) -> Option<&'a C>) -> Self {
        Caster { cast }
    }

    pub fn cast<'a>(&self, value: &'a dyn Any) -> Option<&'a C> {
        (self.cast)(value)
    }
}

impl<C: ?Sized + 'static> Clone for Caster<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized + 'static> Copy for Caster<C> {}

// =============================================================================
// Macros
// =============================================================================

/// Implement [`Capability`] for a trait object type declared elsewhere.
///
/// ```
/// use tola_filter::{impl_capability, Capability};
///
/// pub trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// impl_capability!(dyn Shape => "fn area(&self) -> f64");
///
/// assert_eq!(<dyn Shape as Capability>::NAME, "Shape");
/// assert_eq!(<dyn Shape as Capability>::OPERATIONS, ["fn area(&self) -> f64"]);
/// ```
#[macro_export]
macro_rules! impl_capability {
    (dyn $cap:path $(=> $($operation:literal),* $(,)?)?) => {
        impl $crate::Capability for dyn $cap {
            const NAME: &'static str = stringify!($cap);
            const OPERATIONS: &'static [&'static str] = &[$($($operation),*)?];
        }
    };
}
