use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::assemble::{Artifact, Mode};
use crate::config::GeneratorConfig;
use crate::emit::emit_all;
use crate::error::GenerateError;
use crate::template::BinderTemplate;

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub destination: PathBuf,
    pub mode: Mode,
    pub binders: usize,
    pub date: NaiveDate,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{mode} '{path}' with {binders} binders (date: {date}).",
            mode = match self.mode {
                Mode::Overwrite => "Wrote",
                Mode::Splice => "Spliced",
            },
            path = self.destination.display(),
            binders = self.binders,
            date = self.date.format("%Y-%m-%d"),
        )
    }
}

/// Runs enumerate, emit and assemble for one configuration.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate the artifact in memory, without touching the destination.
    pub fn render(&self) -> Result<Artifact, GenerateError> {
        let variant = self.config.get_variant();
        let template = match self.config.get_template() {
            Some(path) => BinderTemplate::from_file(path, variant)?,
            None => BinderTemplate::builtin(variant),
        };
        debug!(origin = template.origin(), %variant, "loaded template");

        let binders = emit_all(self.config.get_bound(), &template)?;
        Ok(Artifact::assemble(&binders, self.config.get_date()))
    }

    /// Generate the artifact and write it to the configured destination.
    pub fn run(&self) -> Result<Report, GenerateError> {
        info!(
            destination = %self.config.get_destination().display(),
            bound = self.config.get_bound(),
            variant = %self.config.get_variant(),
            mode = %self.config.get_mode(),
            "generating binders"
        );
        let artifact = self.render()?;
        artifact.write(self.config.get_destination(), self.config.get_mode())?;

        Ok(Report {
            destination: self.config.get_destination().to_path_buf(),
            mode: self.config.get_mode(),
            binders: artifact.binder_count(),
            date: self.config.get_date(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Variant;
    use crate::test::assert_contains;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 11, 15).unwrap()
    }

    #[test]
    fn run_overwrite() {
        // Setup
        let dir = tempdir().unwrap();
        let path = dir.path().join("binders.rs");
        let config = GeneratorConfig::new(&path).bound(3).date(date());

        // Execute
        let report = Generator::new(config).run().unwrap();

        // Verify
        assert_eq!(report.binders, 3);
        assert_eq!(
            report.to_string(),
            format!(
                "Wrote '{}' with 3 binders (date: 2021-11-15).",
                path.display()
            )
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("//--{\n"));
        assert!(written.ends_with("//--}\n"));
        assert_contains!(&written, "// date: 2021-11-15");
        assert_eq!(written.matches("impl<").count(), 3);
        assert_contains!(&written, "BindFallibleAction<fn(Arg0, Arg1, Arg2) -> Ret>");
        assert!(!written.contains("Arg3"));
    }

    #[test]
    fn run_twice_identical() {
        // Setup
        let dir = tempdir().unwrap();
        let path = dir.path().join("binders.rs");
        let config = GeneratorConfig::new(&path).date(date());
        let generator = Generator::new(config);

        // Execute
        generator.run().unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        generator.run().unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        // Verify
        assert_eq!(first, second);
    }

    #[test]
    fn run_splice() {
        // Setup
        let dir = tempdir().unwrap();
        let path = dir.path().join("lib.rs");
        std::fs::write(&path, "use x;\n\n//--{\n//--}\n\nfn main() {}\n").unwrap();
        let config = GeneratorConfig::new(&path)
            .bound(2)
            .variant(Variant::Plain)
            .mode(Mode::Splice)
            .date(date());

        // Execute
        let report = Generator::new(config).run().unwrap();

        // Verify
        assert_eq!(report.mode, Mode::Splice);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("use x;\n\n//--{\n"));
        assert!(written.ends_with("//--}\n\nfn main() {}\n"));
        assert_eq!(written.matches("BindAction<").count(), 2);
    }

    #[test]
    fn run_custom_template() {
        // Setup
        let dir = tempdir().unwrap();
        let template = dir.path().join("custom.tmpl");
        std::fs::write(
            &template,
            "// $$GENERICS$$ $$SIGNATURE$$ $$PARAM_TYPES$$ $$CALL_ARGS$$\n// $$EXTRACT$$\n",
        )
        .unwrap();
        let path = dir.path().join("out.rs");
        let config = GeneratorConfig::new(&path)
            .bound(2)
            .variant(Variant::Plain)
            .template(&template)
            .date(date());

        // Execute
        Generator::new(config).run().unwrap();

        // Verify
        let written = std::fs::read_to_string(&path).unwrap();
        assert_contains!(&written, "// Ret: 'static, Arg0: Clone + 'static fn(Arg0) -> Ret Arg0 arg0\n");
    }

    #[test]
    fn run_malformed_template_writes_nothing() {
        // Setup
        let dir = tempdir().unwrap();
        let template = dir.path().join("custom.tmpl");
        std::fs::write(&template, "$$GENERICS$$ $$SIGNATURE$$ $$EXTRACT$$").unwrap();
        let path = dir.path().join("out.rs");
        let config = GeneratorConfig::new(&path)
            .variant(Variant::Plain)
            .template(&template);

        // Execute
        let error = Generator::new(config).run().unwrap_err();

        // Verify
        assert_matches!(error, GenerateError::MissingHole { .. });
        assert!(!path.exists());
    }

    #[test]
    fn run_sentinel_template_keeps_region() {
        // Setup
        let dir = tempdir().unwrap();
        let template = dir.path().join("custom.tmpl");
        std::fs::write(
            &template,
            "// $$GENERICS$$ $$SIGNATURE$$ $$PARAM_TYPES$$ $$CALL_ARGS$$\n//--}\n// $$EXTRACT$$\n",
        )
        .unwrap();
        let path = dir.path().join("out.rs");
        let original = "mod a;\n//--{\n//--}\n";
        std::fs::write(&path, original).unwrap();
        let config = GeneratorConfig::new(&path)
            .variant(Variant::Plain)
            .mode(Mode::Splice)
            .template(&template);

        // Execute
        let error = Generator::new(config).run().unwrap_err();

        // Verify
        assert_matches!(error, GenerateError::RegionSentinel { arity: 0, line: 2, .. });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn run_unreadable_template() {
        // Setup
        let dir = tempdir().unwrap();
        let config = GeneratorConfig::new(dir.path().join("out.rs"))
            .template(dir.path().join("absent.tmpl"));

        // Execute
        let error = Generator::new(config).run().unwrap_err();

        // Verify
        assert_matches!(error, GenerateError::Read { .. });
    }
}
