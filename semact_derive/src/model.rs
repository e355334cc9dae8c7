use proc_macro2::Span;
use semact_gen::Variant;

#[derive(Debug)]
pub struct DeriveBinders {
    pub variant: Variant,
    pub bound: usize,
    pub span: Span,
}

impl PartialEq for DeriveBinders {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant && self.bound == other.bound
    }
}

impl Eq for DeriveBinders {}
