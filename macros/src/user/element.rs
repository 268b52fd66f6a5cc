use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_quote, DeriveInput};

use crate::common::collect_attr_paths;

/// #[derive(Element)] offers one caster per `#[element(...)]` entry.
///
/// Offers are made in attribute order; the first one for a capability wins.
/// Non-generic types then also offer whichever of `Debug`, `Display` and
/// `Error` they implement, detected at the expansion site. Generic types only
/// offer what they list.
pub fn expand_derive_element(input: DeriveInput) -> TokenStream2 {
    let capabilities = match collect_attr_paths(&input.attrs, "element") {
        Ok(paths) => paths,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let mut generics = input.generics.clone();
    generics.make_where_clause().predicates.push(parse_quote!(Self: 'static));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let offers = capabilities.iter().map(|cap| {
        quote! {
            request.provide::<dyn #cap + 'static>(::tola_filter::Caster::<dyn #cap + 'static>::new(|any| {
                any.downcast_ref::<Self>().map(|value| value as &(dyn #cap + 'static))
            }));
        }
    });

    let detected = input.generics.params.is_empty().then(|| {
        quote! { ::tola_filter::__offer_detected!(request, Self); }
    });

    quote! {
        impl #impl_generics ::tola_filter::Element for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn provide(&self, request: &mut ::tola_filter::Request<'_>) {
                #(#offers)*
                #detected
            }
        }
    }
}
