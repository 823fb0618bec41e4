//! Small procedural macros shared across the `pkgsack` workspace.

#![deny(missing_docs)]

use proc_macro::TokenStream;
use quote::quote_spanned;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident};

/// Fails the build unless every field (for a struct) or variant (for an
/// enum) of the annotated item is declared in ascending alphabetical order.
///
/// This does not sort anything for you. It is applied to the repo-metadata
/// DTOs (`PackageMetadata`, `RepoMetadata`), which gain a field every time a
/// loader needs to hand in another piece of upstream repodata; without this
/// check, declaration order carries no meaning and drift between the struct
/// and its doc comments is easy to miss in review.
#[proc_macro_attribute]
pub fn sorted(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let out = item.clone();
    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;

    let (idents, kind): (Vec<&Ident>, &str) = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => {
                (fields.named.iter().map(|f| f.ident.as_ref().unwrap()).collect(), "field")
            }
            _ => panic!("#[sorted] only supports structs with named fields."),
        },
        Data::Enum(data_enum) => (data_enum.variants.iter().map(|v| &v.ident).collect(), "variant"),
        Data::Union(_) => panic!("#[sorted] only supports structs and enums."),
    };

    match first_out_of_order(&idents) {
        Some((offender, prev)) => {
            let error = format!("the {kind} `{offender}` must be sorted before `{prev}` in `{name}`");
            TokenStream::from(quote_spanned! { offender.span() => compile_error!(#error); })
        }
        None => out,
    }
}

/// Returns the first `(offender, predecessor)` pair that breaks ascending
/// order, if any.
fn first_out_of_order<'a>(idents: &[&'a Ident]) -> Option<(&'a Ident, &'a Ident)> {
    idents.windows(2).find(|pair| *pair[1] < *pair[0]).map(|pair| (pair[1], pair[0]))
}
