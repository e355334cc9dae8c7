use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::DeriveBinders;

impl TryFrom<DeriveBinders> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveBinders) -> Result<Self, Self::Error> {
        let DeriveBinders {
            variant,
            bound,
            span,
        } = value;
        let source = semact_gen::render_builtin(bound, variant)
            .map_err(|error| syn::Error::new(span, error.to_string()))?;
        let binders: TokenStream2 = source.parse().map_err(|error| {
            syn::Error::new(
                span,
                format!("Invalid - generated {variant} binders do not tokenize: {error}."),
            )
        })?;

        Ok(quote! {
            const _: () = {
                #binders
            };
        })
    }
}
