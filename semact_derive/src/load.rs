use semact_gen::Variant;
use syn::parse::{Parse, ParseStream};

use crate::model::DeriveBinders;

// Accepts `variant, bound` with an optional trailing comma.
impl Parse for DeriveBinders {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let span = input.span();
        let variant_name: syn::Ident = input.parse()?;
        let variant = variant_name.to_string().parse::<Variant>().map_err(|_| {
            syn::Error::new(
                variant_name.span(),
                format!("Invalid - unknown binder variant `{variant_name}`, expected `plain` or `capturing`."),
            )
        })?;
        input.parse::<syn::Token![,]>()?;
        let bound_literal: syn::LitInt = input.parse()?;
        let bound = bound_literal.base10_parse::<usize>()?;
        if !input.is_empty() {
            input.parse::<syn::Token![,]>()?;
        }

        Ok(DeriveBinders {
            variant,
            bound,
            span,
        })
    }
}
