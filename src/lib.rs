#![cfg_attr(not(feature = "std"), no_std)]

// Feature flags handled:
// - std: default, enables std library (io::Error element, std log/error glue)

//! # tola-filter
//!
//! Runtime capability dispatch over heterogeneous collections.
//!
//! **Hand it a callback, it finds the elements the callback can take.**
//!
//! ## Architecture
//!
//! A collection holds erased values (`Option<Box<dyn Element>>`). A callback
//! declares, through its parameter type, one capability: a trait object type
//! such as `dyn Readable`. The dispatcher selects every element whose
//! concrete type provides that capability and hands them over.
//!
//! ### 1. Matching
//! Each element answers capability lookups through a request/provide
//! handshake keyed by the capability's `TypeId`:
//!
//! ```text
//! Descriptor(dyn Readable) -> Request { wanted: TypeId } -> Element::provide -> Caster
//! ```
//!
//! ### 2. Shapes
//! A callback takes exactly one parameter:
//!
//! | Mode | Entry point | Parameter |
//! |------|-------------|-----------|
//! | Single | [`Collection::filter`] | `&dyn C` |
//! | Batch | [`Collection::filter_slice`] | `&[&dyn C]` |
//!
//! ### 3. Layers
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Model                                                   |
//! |  - Capability, Descriptor, Caster, Element, Request               |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Checks                                                  |
//! |  - matcher (satisfies, cast), shape (validate, callable)          |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: User API                                                |
//! |  - Collection, dispatch, #[capability], #[derive(Element)]        |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Errors
//!
//! - Malformed callbacks fail with [`FilterError::InvalidCallback`] before
//!   any element is inspected.
//! - An error returned by the callback stops single mode and comes back
//!   unchanged as [`FilterError::Callback`].
//!
//! ## Quick Start
//!
//! ```
//! use tola_filter::prelude::*;
//!
//! #[capability]
//! trait Readable {
//!     fn read_all(&self) -> Vec<u8>;
//! }
//!
//! #[derive(Element)]
//! #[element(Readable)]
//! struct Buffer(Vec<u8>);
//!
//! impl Readable for Buffer {
//!     fn read_all(&self) -> Vec<u8> {
//!         self.0.clone()
//!     }
//! }
//!
//! #[derive(Element)]
//! struct Empty;
//!
//! let items = collection![Buffer(b"hi".to_vec()), Empty, Nil, 42_i32];
//!
//! let mut read = Vec::new();
//! items
//!     .filter::<dyn Readable, _>(|r| {
//!         read.push(r.read_all());
//!         Ok::<(), std::io::Error>(())
//!     })
//!     .unwrap();
//! assert_eq!(read, [b"hi".to_vec()]);
//! ```

// Allow `::tola_filter` to work inside the crate itself
extern crate self as tola_filter;

extern crate alloc;

// =============================================================================
// Layer 0: Model
// =============================================================================
pub mod capability;
pub mod element;
pub mod std_caps;
pub mod error;
#[doc(hidden)]
pub mod detect;

// =============================================================================
// Layer 1: Checks
// =============================================================================
pub mod matcher;
pub mod callback;
pub mod shape;

// =============================================================================
// Layer 2: User API
// =============================================================================
pub mod dispatch;
pub mod collection;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use capability::{Capability, Caster, Descriptor};
pub use element::{AsAny, Element, Request};
pub use error::{BoxError, FilterError, InvalidCallback, Result};
pub use matcher::{cast, satisfies};
pub use callback::{Argument, Func, Outcome, ParamType, ReturnType, Signature};
pub use shape::{callable, validate, Mode, Shape};
pub use dispatch::{
    filter, filter_dyn, filter_slice, filter_slice_dyn, filter_slice_with, filter_with, FilterOption,
};
pub use collection::{Collection, IntoItem, Item, Nil};

// Re-export proc-macros
pub use macros::{capability, Element};

#[doc(hidden)]
pub mod __private {
    pub use alloc::vec;
}

/// Common items for capability dispatch.
pub mod prelude {
    pub use crate::{Capability, Element, Collection, Item, Nil, Func, FilterError, InvalidCallback};
    pub use crate::collection;
    pub use macros::capability;
}
