//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[capability]` | on trait | `impl Capability for dyn Trait` |
//! | `#[derive(Element)]` | on struct/enum | `impl Element` with `#[element(...)]` list, plus detected std traits |

mod capability;
mod element;

pub use capability::expand_capability;
pub use element::expand_derive_element;
