//! # Standard Capabilities
//!
//! Capabilities for the object-safe core traits, and elements for common
//! std types.
//!
//! | Capability | Operations |
//! |------------|------------|
//! | `dyn Any` | none (universal: every present value satisfies it) |
//! | `dyn Debug` | `fmt` |
//! | `dyn Display` | `fmt` |
//! | `dyn Error` | `source`, `description`, `cause` |
//!
//! Primitive numbers, `bool`, `char`, `String` and `&'static str` provide
//! `Debug` and `Display`; `()` provides `Debug`; error types provide all three
//! of `Debug`, `Display` and `Error`.

use alloc::string::String;
use core::any::Any;
use core::error::Error;
use core::fmt::{self, Debug, Display};

use crate::capability::Capability;
use crate::impl_element;

// =============================================================================
// Capabilities
// =============================================================================

impl Capability for dyn Any {
    const NAME: &'static str = "core::any::Any";
    const OPERATIONS: &'static [&'static str] = &[];
}

impl Capability for dyn Debug {
    const NAME: &'static str = "core::fmt::Debug";
    const OPERATIONS: &'static [&'static str] =
        &["fn fmt(&self, f: &mut Formatter<'_>) -> Result"];
}

impl Capability for dyn Display {
    const NAME: &'static str = "core::fmt::Display";
    const OPERATIONS: &'static [&'static str] =
        &["fn fmt(&self, f: &mut Formatter<'_>) -> Result"];
}

impl Capability for dyn Error {
    const NAME: &'static str = "core::error::Error";
    const OPERATIONS: &'static [&'static str] = &[
        "fn source(&self) -> Option<&(dyn Error + 'static)>",
        "fn description(&self) -> &str",
        "fn cause(&self) -> Option<&dyn Error>",
    ];
}

// =============================================================================
// Elements
// =============================================================================

/// Implement `Element` for types providing `Debug` and `Display`.
macro_rules! display_elements {
    ($($ty:ty),* $(,)?) => {
        $( impl_element!($ty => Debug, Display); )*
    };
}

display_elements!(
    bool, char,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    String, &'static str,
);

impl_element!(() => Debug);
impl_element!(fmt::Error => Debug, Display, Error);

#[cfg(feature = "std")]
impl_element!(std::io::Error => Debug, Display, Error);
