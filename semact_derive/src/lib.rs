//! Compile-time expansion of the `semact` binders.
//!
//! `binders!(variant, bound)` runs the `semact_gen` emitter with its builtin template and
//! expands to the resulting implementations, one per arity in `0..bound`.
//! The names the binders use (`BindAction`, `BindFallibleAction`, `SemanticAction`, `ErasedArgs`,
//! `Slot`, `ActionError`) must be in scope at the invocation site.
extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveBinders;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

#[proc_macro]
pub fn binders(input: TokenStream) -> TokenStream {
    let binders = syn::parse_macro_input!(input as DeriveBinders);

    match TokenStream2::try_from(binders) {
        Ok(token_stream) => token_stream.into(),
        Err(error) => error.to_compile_error().into(),
    }
}
