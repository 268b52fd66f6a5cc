//! Common parsing utilities
//!
//! Shared parsing helpers for consistent syntax across macros.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Path, Token,
};

// =============================================================================
// Comma-separated List Parsing
// =============================================================================

/// Parse a comma-separated list of items
pub fn parse_comma_separated<T: Parse>(input: ParseStream) -> syn::Result<Vec<T>> {
    let items = Punctuated::<T, Token![,]>::parse_terminated(input)?;
    Ok(items.into_iter().collect())
}

/// Parse comma-separated paths (e.g., in `element(A, b::B)`)
pub fn parse_path_list(input: ParseStream) -> syn::Result<Vec<Path>> {
    parse_comma_separated(input)
}

// =============================================================================
// Attribute Collection
// =============================================================================

/// Collect the paths of every `#[name(...)]` attribute, in order.
///
/// A bare `#[name]` contributes nothing.
pub fn collect_attr_paths(attrs: &[Attribute], name: &str) -> syn::Result<Vec<Path>> {
    let mut paths = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(name)) {
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        paths.extend(attr.parse_args_with(parse_path_list)?);
    }
    Ok(paths)
}
