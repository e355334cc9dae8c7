use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::arity::DEFAULT_BOUND;
use crate::assemble::Mode;
use crate::template::Variant;

/// The configuration of one generation run.
///
/// ### Example
/// ```
/// use semact_gen::{GeneratorConfig, Mode, Variant};
///
/// let config = GeneratorConfig::new("src/binders.rs")
///     .bound(8)
///     .variant(Variant::Plain)
///     .mode(Mode::Splice);
///
/// assert_eq!(config.get_bound(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    destination: PathBuf,
    bound: usize,
    variant: Variant,
    mode: Mode,
    template: Option<PathBuf>,
    date: Option<NaiveDate>,
}

impl GeneratorConfig {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            bound: DEFAULT_BOUND,
            variant: Variant::Capturing,
            mode: Mode::Overwrite,
            template: None,
            date: None,
        }
    }

    /// Emit binders for arities `0..bound`.
    pub fn bound(mut self, bound: usize) -> Self {
        self.bound = bound;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Use the template file at `path` instead of the builtin template.
    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template.replace(path.into());
        self
    }

    /// Stamp the artifact with `date` instead of today's local date.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date.replace(date);
        self
    }

    pub fn get_destination(&self) -> &Path {
        &self.destination
    }

    pub fn get_bound(&self) -> usize {
        self.bound
    }

    pub fn get_variant(&self) -> Variant {
        self.variant
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn get_template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// The configured date, or today's local date.
    pub fn get_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
