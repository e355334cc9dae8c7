//! Binder generator for `semact`.
//!
//! Rust has no variadic generics, so a semantic action taking `N` arguments needs its own generic
//! implementation for each `N`.
//! This crate renders those implementations from a text template, one per arity in `0..bound`:
//! 1. [`arities`] enumerates the arities.
//! 2. [`emit`] substitutes the template's holes for one arity.
//! 3. [`Artifact`] concatenates the binders between `//--{` and `//--}` sentinels, and either
//! overwrites a destination file or splices the block over the destination's existing region.
//!
//! ```
//! use semact_gen::{emit_all, Artifact, BinderTemplate, Variant};
//!
//! let template = BinderTemplate::builtin(Variant::Capturing);
//! let binders = emit_all(3, &template).unwrap();
//! let date = chrono::NaiveDate::from_ymd_opt(2021, 11, 15).unwrap();
//! let artifact = Artifact::assemble(&binders, date);
//!
//! let spliced = artifact.splice("mod a;\n//--{\n//--}\nmod b;\n").unwrap();
//! assert!(spliced.starts_with("mod a;\n//--{\n"));
//! assert!(spliced.ends_with("//--}\nmod b;\n"));
//! ```
mod arity;
mod assemble;
mod config;
mod emit;
mod error;
mod generator;
mod template;

pub use arity::{arities, Arities, Arity, ParameterSlot, DEFAULT_BOUND};
pub use assemble::{Artifact, Mode, REGION_CLOSE, REGION_OPEN};
pub use config::GeneratorConfig;
pub use emit::{emit, emit_all, BinderDefinition, BinderParts, RETURN_TYPE};
pub use error::{GenerateError, RegionError};
pub use generator::{Generator, Report};
pub use template::{BinderTemplate, Hole, Variant};

/// Render the builtin `variant` binders for arities `0..bound` as one source string.
///
/// The string holds only the binders, without region sentinels or date.
pub fn render_builtin(bound: usize, variant: Variant) -> Result<String, GenerateError> {
    let template = BinderTemplate::builtin(variant);
    Ok(emit_all(bound, &template)?
        .iter()
        .map(BinderDefinition::text)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
