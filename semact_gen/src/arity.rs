use crate::emit::RETURN_TYPE;

/// The number of binders emitted when no bound is configured.
pub const DEFAULT_BOUND: usize = 16;

/// The loop index of one binder.
/// A binder at arity `a` binds callbacks taking `a + 1` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arity(usize);

impl Arity {
    pub fn new(index: usize) -> Self {
        Arity(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// The number of parameters of callbacks bound at this arity.
    pub fn argument_count(&self) -> usize {
        self.0 + 1
    }

    /// The parameter slots `0..=index`, in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = ParameterSlot> + Clone {
        (0..self.argument_count()).map(ParameterSlot::new)
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enumerate the arities `0..bound` in ascending order.
///
/// The sequence is lazy and may be restarted by cloning it before consumption.
/// A `bound` of `0` yields nothing.
///
/// ### Example
/// ```
/// use semact_gen::arities;
///
/// let indices: Vec<usize> = arities(3).map(|a| a.index()).collect();
/// assert_eq!(indices, vec![0, 1, 2]);
/// ```
pub fn arities(bound: usize) -> Arities {
    Arities { next: 0, bound }
}

#[derive(Debug, Clone)]
pub struct Arities {
    next: usize,
    bound: usize,
}

impl Iterator for Arities {
    type Item = Arity;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.bound {
            let arity = Arity(self.next);
            self.next += 1;
            Some(arity)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bound.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Arities {}

impl std::iter::FusedIterator for Arities {}

/// The i-th formal parameter of a bound callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSlot(usize);

impl ParameterSlot {
    pub fn new(index: usize) -> Self {
        ParameterSlot(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// The synthetic generic type name, `Arg{i}`.
    pub fn type_name(&self) -> String {
        format!("Arg{i}", i = self.0)
    }

    /// The local variable holding the extracted argument, `arg{i}`.
    pub fn local_name(&self) -> String {
        format!("arg{i}", i = self.0)
    }

    /// Reconstruct the argument at its absolute position in the erased container.
    /// The return type is passed along so a `PassOn` result can still forward the slot.
    pub fn extraction(&self) -> String {
        format!(
            "let {local} = args.extract::<{ty}, {ret}>({i})?;",
            local = self.local_name(),
            ty = self.type_name(),
            ret = RETURN_TYPE,
            i = self.0,
        )
    }
}
