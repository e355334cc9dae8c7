use crate::arity::{arities, Arity};
use crate::assemble::is_sentinel;
use crate::error::GenerateError;
use crate::template::{hole_tokens, BinderTemplate, Hole, Variant};

use tracing::debug;

/// The name of the return type parameter, declared ahead of the argument parameters.
pub const RETURN_TYPE: &str = "Ret";

/// Record the callback's success value, or a semantic error's payload in its place.
/// Any other error propagates to the caller unchanged.
const CAPTURE_BLOCK: &str = "match outcome {
    Ok(ret) => args.record(ret),
    Err(ActionError::Semantic(error)) => args.record(error.into_data()),
    Err(error) => Err(error),
}";

/// The substitution values for one arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderParts {
    arity: Arity,
}

impl BinderParts {
    pub fn new(arity: Arity) -> Self {
        Self { arity }
    }

    /// `Ret, Arg0, .., Arg{a}`: one return type followed by `a + 1` argument types.
    pub fn generic_names(&self) -> Vec<String> {
        std::iter::once(RETURN_TYPE.to_string())
            .chain(self.arity.slots().map(|s| s.type_name()))
            .collect()
    }

    /// The generic declaration; every parameter outlives `'static` so it can be erased.
    /// Argument types are `Clone`, since a `PassOn` result forwards an input the callback also received.
    pub fn generics(&self) -> String {
        std::iter::once(format!("{RETURN_TYPE}: 'static"))
            .chain(
                self.arity
                    .slots()
                    .map(|s| format!("{}: Clone + 'static", s.type_name())),
            )
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `Arg0, .., Arg{a}`: the callback's formal parameter types.
    pub fn param_types(&self) -> String {
        self.arity
            .slots()
            .map(|s| s.type_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `fn(Arg0, .., Arg{a}) -> Ret`: distinguishes the binder implementations of each arity.
    pub fn signature(&self) -> String {
        format!("fn({}) -> {RETURN_TYPE}", self.param_types())
    }

    pub fn extractions(&self) -> Vec<String> {
        self.arity.slots().map(|s| s.extraction()).collect()
    }

    /// `arg0, .., arg{a}`
    pub fn call_args(&self) -> String {
        self.arity
            .slots()
            .map(|s| s.local_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn values(&self, variant: Variant) -> Vec<(Hole, String)> {
        let mut values = vec![
            (Hole::Generics, self.generics()),
            (Hole::Signature, self.signature()),
            (Hole::ParamTypes, self.param_types()),
            (Hole::Extract, self.extractions().join("\n")),
            (Hole::CallArgs, self.call_args()),
        ];

        if variant == Variant::Capturing {
            values.push((Hole::Capture, CAPTURE_BLOCK.to_string()));
        }

        values
    }
}

/// The fully substituted binder for one arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderDefinition {
    arity: Arity,
    variant: Variant,
    text: String,
}

impl BinderDefinition {
    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Render the binder for `arity` from `template`.
///
/// ### Example
/// ```
/// use semact_gen::{emit, Arity, BinderTemplate, Variant};
///
/// let template = BinderTemplate::builtin(Variant::Plain);
/// let binder = emit(Arity::new(1), &template).unwrap();
/// assert!(binder.text().contains("let ret = (self)(arg0, arg1);"));
/// ```
pub fn emit(arity: Arity, template: &BinderTemplate) -> Result<BinderDefinition, GenerateError> {
    let parts = BinderParts::new(arity);
    let text = template.fill(&parts.values(template.variant()));

    if let Some(token) = hole_tokens(&text).first() {
        return Err(GenerateError::UnresolvedHole {
            arity: arity.index(),
            token: token.to_string(),
        });
    }

    if let Some((i, line)) = text.lines().enumerate().find(|(_, line)| is_sentinel(line)) {
        return Err(GenerateError::RegionSentinel {
            origin: template.origin().to_string(),
            arity: arity.index(),
            sentinel: line.trim().to_string(),
            line: i + 1,
        });
    }

    debug!(arity = arity.index(), variant = %template.variant(), "emitted binder");

    Ok(BinderDefinition {
        arity,
        variant: template.variant(),
        text,
    })
}

/// Render one binder per arity in `0..bound`, in ascending order.
pub fn emit_all(
    bound: usize,
    template: &BinderTemplate,
) -> Result<Vec<BinderDefinition>, GenerateError> {
    arities(bound)
        .map(|arity| emit(arity, template))
        .collect()
}
