use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ItemTrait, TraitItem};

use crate::common::{render_signature, requires_sized_self};

/// #[capability] keeps the trait as written and implements `Capability` for
/// its trait object type.
///
/// The name goes through `concat!(module_path!(), ...)` so it is qualified
/// with the module the trait is declared in.
pub fn expand_capability(item: ItemTrait) -> TokenStream2 {
    if !item.generics.params.is_empty() {
        return syn::Error::new_spanned(&item.generics, "#[capability] does not support generic traits")
            .to_compile_error();
    }

    let ident = &item.ident;
    let ident_str = ident.to_string();
    let operations = operations(&item);

    quote! {
        #item

        impl ::tola_filter::Capability for dyn #ident {
            const NAME: &'static str = ::core::concat!(::core::module_path!(), "::", #ident_str);
            const OPERATIONS: &'static [&'static str] = &[#(#operations),*];
        }
    }
}

/// Rendered signatures of the methods callable through `dyn Trait`.
fn operations(item: &ItemTrait) -> Vec<String> {
    item.items
        .iter()
        .filter_map(|item| match item {
            TraitItem::Fn(method) if !requires_sized_self(method) => Some(render_signature(&method.sig)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_operations_in_declaration_order() {
        let item: ItemTrait = parse_quote! {
            trait ReadCloser {
                const LIMIT: usize;
                fn read(&mut self, buf: &mut [u8]) -> usize;
                fn boxed(self) -> Box<Self> where Self: Sized { Box::new(self) }
                fn close(&mut self);
            }
        };
        assert_eq!(
            operations(&item),
            ["fn read(&mut self, buf: &mut [u8]) -> usize", "fn close(&mut self)"]
        );
    }

    #[test]
    fn test_generic_trait_rejected() {
        let item: ItemTrait = parse_quote! {
            trait Sink<T> {
                fn put(&mut self, value: T);
            }
        };
        let expanded = expand_capability(item).to_string();
        assert!(expanded.contains("compile_error"));
        assert!(expanded.contains("does not support generic traits"));
    }

    #[test]
    fn test_expansion_keeps_trait() {
        let item: ItemTrait = parse_quote! {
            pub trait Marker {}
        };
        let expanded = expand_capability(item).to_string();
        assert!(expanded.contains("pub trait Marker"));
        assert!(expanded.contains("Capability for dyn Marker"));
    }
}
