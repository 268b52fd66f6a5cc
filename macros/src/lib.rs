//! Procedural macros for the tola-filter capability dispatcher
//!
//! # Macro API
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[capability]` | trait | Make `dyn Trait` usable as a capability |
//! | `#[derive(Element)]` | struct/enum | Make a type usable as a collection element |
//! | `#[element(A, B)]` | struct/enum | Declare the capabilities the type provides |
//!
//! ## Example
//!
//! ```ignore
//! #[capability]
//! trait Readable {
//!     fn read_all(&self) -> Vec<u8>;
//! }
//!
//! #[derive(Debug, Element)]
//! #[element(Readable)]
//! struct Buffer(Vec<u8>);
//! ```
//!
//! `Buffer` also matches `dyn Debug`: on non-generic types the derive offers
//! `Debug`, `Display` and `Error` whenever the type implements them.
//!
//! Generated code refers to `::tola_filter`, so the runtime crate must be a
//! dependency under that name.

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations
// =============================================================================

mod common;
mod user;

// =============================================================================
// User-facing Macros (user/)
// =============================================================================

/// Implement `Capability` for `dyn Trait`.
///
/// The capability name is the trait's module path plus its name. Every
/// object-safe method becomes one rendered operation, in declaration order;
/// methods bounded by `where Self: Sized` are not callable through the trait
/// object and are left out.
///
/// # Usage
/// ```ignore
/// #[capability]
/// pub trait Closer {
///     fn close(&mut self) -> Result<(), std::io::Error>;
///
///     fn boxed(self) -> Box<Self> where Self: Sized { Box::new(self) }
/// }
///
/// // <dyn Closer>::OPERATIONS == ["fn close(&mut self) -> Result<(), std::io::Error>"]
/// ```
///
/// Generic traits are rejected: a capability is one concrete trait object type.
#[proc_macro_attribute]
pub fn capability(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr2: proc_macro2::TokenStream = attr.into();
    if !attr2.is_empty() {
        return syn::Error::new_spanned(attr2, "#[capability] takes no arguments")
            .to_compile_error()
            .into();
    }
    let item = parse_macro_input!(item as syn::ItemTrait);
    user::expand_capability(item).into()
}

/// Derive macro to implement `Element`.
///
/// Capabilities are listed in one or more `#[element(...)]` attributes; each
/// entry is a trait path whose trait object type implements `Capability`.
/// Without the attribute the type is still an element, it just provides
/// nothing besides the universal `dyn Any`.
///
/// # Usage
/// ```ignore
/// #[derive(Debug, Element)]
/// #[element(Readable, Closer)]
/// #[element(std::fmt::Debug)]
/// struct FileHandleStub { data: Vec<u8> }
/// ```
#[proc_macro_derive(Element, attributes(element))]
pub fn derive_element(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_element(input).into()
}
