//! Stable rendering of method signatures.
//!
//! `TokenStream::to_string` spacing differs between the compiler and the
//! fallback implementation, so operations are rendered by hand:
//!
//! ```text
//! fn read ( & mut self , buf : & mut [ u8 ] ) -> usize
//!     =>  fn read(&mut self, buf: &mut [u8]) -> usize
//! ```

use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Signature, TraitItemFn, TypeParamBound, WherePredicate};

/// What was written last, as far as spacing is concerned.
#[derive(Clone, PartialEq)]
enum Prev {
    /// Start of output or just after an opening delimiter.
    Start,
    Ident(String),
    Punct { ch: char, joint: bool, glued: bool },
    Literal,
    Group,
}

/// Render a method signature as `fn name(params) -> ret`.
pub fn render_signature(sig: &Signature) -> String {
    render_tokens(sig.to_token_stream())
}

/// Render a token stream with conventional rustfmt-like spacing.
pub fn render_tokens(tokens: TokenStream) -> String {
    let mut out = String::new();
    let mut prev = Prev::Start;
    render_into(tokens, &mut out, &mut prev);
    out
}

fn render_into(tokens: TokenStream, out: &mut String, prev: &mut Prev) {
    for token in tokens {
        match token {
            TokenTree::Ident(ident) => {
                let name = ident.to_string();
                if space_before_word(prev) {
                    out.push(' ');
                }
                out.push_str(&name);
                *prev = Prev::Ident(name);
            }
            TokenTree::Literal(literal) => {
                if space_before_word(prev) {
                    out.push(' ');
                }
                out.push_str(&literal.to_string());
                *prev = Prev::Literal;
            }
            TokenTree::Punct(punct) => {
                let ch = punct.as_char();
                let glued = matches!(prev, Prev::Punct { joint: true, .. });
                if !glued && space_before_punct(ch, prev) {
                    out.push(' ');
                }
                out.push(ch);
                *prev = Prev::Punct {
                    ch,
                    joint: punct.spacing() == Spacing::Joint,
                    glued,
                };
            }
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::Brace => ("{ ", " }"),
                    Delimiter::None => ("", ""),
                };
                if space_before_group(group.delimiter(), prev) {
                    out.push(' ');
                }
                out.push_str(open);
                let mut inner = Prev::Start;
                render_into(group.stream(), out, &mut inner);
                out.push_str(close);
                *prev = Prev::Group;
            }
        }
    }
}

/// Punctuation that binds to whatever follows it.
fn binds_right(prev: &Prev) -> bool {
    match prev {
        Prev::Start => true,
        // `::` path separator, `'` of a lifetime, `&` and `*` of pointer types
        Prev::Punct { ch: ':', glued: true, .. } => true,
        Prev::Punct { ch, joint, .. } => *joint || matches!(ch, '&' | '<' | '\'' | '?' | '*' | '!'),
        _ => false,
    }
}

fn space_before_word(prev: &Prev) -> bool {
    !binds_right(prev)
}

fn space_before_punct(ch: char, prev: &Prev) -> bool {
    if binds_right(prev) {
        return false;
    }
    match ch {
        ',' | ';' | '.' | '>' => false,
        ':' => false,
        '<' => !matches!(prev, Prev::Ident(_)),
        _ => true,
    }
}

fn space_before_group(delimiter: Delimiter, prev: &Prev) -> bool {
    if binds_right(prev) {
        return false;
    }
    match (delimiter, prev) {
        (Delimiter::Parenthesis, Prev::Ident(name)) => matches!(name.as_str(), "mut" | "dyn" | "impl"),
        // `Foo<T>(` attaches, `-> (` does not
        (Delimiter::Parenthesis, Prev::Punct { ch: '>', glued, .. }) => *glued,
        _ => true,
    }
}

// =============================================================================
// Object Safety
// =============================================================================

/// Whether the method is excluded from the trait object by `where Self: Sized`.
pub fn requires_sized_self(method: &TraitItemFn) -> bool {
    let Some(where_clause) = &method.sig.generics.where_clause else {
        return false;
    };
    where_clause.predicates.iter().any(|predicate| match predicate {
        WherePredicate::Type(predicate) => {
            is_self(&predicate.bounded_ty)
                && predicate.bounds.iter().any(|bound| match bound {
                    TypeParamBound::Trait(bound) => bound.path.is_ident("Sized"),
                    _ => false,
                })
        }
        _ => false,
    })
}

fn is_self(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn render(method: TraitItemFn) -> String {
        render_signature(&method.sig)
    }

    #[test]
    fn test_render_receivers_and_returns() {
        assert_eq!(render(parse_quote!(fn read_all(&self) -> Vec<u8>;)), "fn read_all(&self) -> Vec<u8>");
        assert_eq!(render(parse_quote!(fn label(&self) -> &str;)), "fn label(&self) -> &str");
        assert_eq!(render(parse_quote!(fn close(&mut self);)), "fn close(&mut self)");
    }

    #[test]
    fn test_render_params() {
        assert_eq!(
            render(parse_quote!(fn read(&mut self, buf: &mut [u8]) -> usize;)),
            "fn read(&mut self, buf: &mut [u8]) -> usize"
        );
        assert_eq!(
            render(parse_quote!(fn pair(&self, a: u8, b: Option<&'static str>) -> (u8, u8);)),
            "fn pair(&self, a: u8, b: Option<&'static str>) -> (u8, u8)"
        );
    }

    #[test]
    fn test_render_paths_and_objects() {
        assert_eq!(
            render(parse_quote!(fn close(&mut self) -> Result<(), std::io::Error>;)),
            "fn close(&mut self) -> Result<(), std::io::Error>"
        );
        assert_eq!(
            render(parse_quote!(fn source(&self) -> Option<&(dyn Error + 'static)>;)),
            "fn source(&self) -> Option<&(dyn Error + 'static)>"
        );
        assert_eq!(
            render(parse_quote!(fn nested(&self) -> Vec<Vec<u8>>;)),
            "fn nested(&self) -> Vec<Vec<u8>>"
        );
    }

    #[test]
    fn test_requires_sized_self() {
        assert!(requires_sized_self(&parse_quote!(fn boxed(self) -> Box<Self> where Self: Sized;)));
        assert!(!requires_sized_self(&parse_quote!(fn name(&self) -> String;)));
        assert!(!requires_sized_self(&parse_quote!(fn id(&self) where Self: Send;)));
    }
}
