// Common utilities shared by the user-facing macros
//
// This module contains:
// - parse_utils: attribute and list parsing helpers
// - signature: stable rendering of method signatures

mod parse_utils;
mod signature;

pub use parse_utils::*;
pub use signature::*;
