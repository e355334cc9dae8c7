use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::emit::BinderDefinition;
use crate::error::{GenerateError, RegionError};

/// The sentinel line opening the regeneration region.
pub const REGION_OPEN: &str = "//--{";
/// The sentinel line closing the regeneration region.
pub const REGION_CLOSE: &str = "//--}";

/// Whether `line` reads as a region sentinel, ignoring surrounding whitespace.
pub(crate) fn is_sentinel(line: &str) -> bool {
    matches!(line.trim(), REGION_OPEN | REGION_CLOSE)
}

const GENERATED_BY: &str = "// Generated by semact-gen; edits inside this region are overwritten.";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// How the artifact reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The artifact becomes the entire destination.
    Overwrite,
    /// The artifact replaces the unique region of an existing destination.
    Splice,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Overwrite => write!(f, "overwrite"),
            Mode::Splice => write!(f, "splice"),
        }
    }
}

/// The delimited block of generated binders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    block: String,
    binders: usize,
}

impl Artifact {
    /// Concatenate `binders`, in the given order, between the region sentinels.
    pub fn assemble(binders: &[BinderDefinition], date: NaiveDate) -> Self {
        let mut block = String::default();
        block.push_str(REGION_OPEN);
        block.push('\n');
        block.push_str(GENERATED_BY);
        block.push('\n');
        block.push_str(&format!("// date: {}\n", date.format(DATE_FORMAT)));

        for (i, binder) in binders.iter().enumerate() {
            if i > 0 {
                block.push('\n');
            }
            block.push_str(binder.text());
            if !binder.text().ends_with('\n') {
                block.push('\n');
            }
        }

        block.push_str(REGION_CLOSE);

        Self {
            block,
            binders: binders.len(),
        }
    }

    /// The block, from the opening sentinel through the closing sentinel (no trailing newline).
    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn binder_count(&self) -> usize {
        self.binders
    }

    /// The whole-file content for [`Mode::Overwrite`].
    pub fn overwrite(&self) -> String {
        format!("{}\n", self.block)
    }

    /// Replace the unique region of `destination` with this block.
    /// Text outside the region is kept byte for byte.
    pub fn splice(&self, destination: &str) -> Result<String, RegionError> {
        let region = Region::locate(destination)?;
        debug!(start = region.start, end = region.end, "located region");

        let mut out = String::with_capacity(destination.len() + self.block.len());
        out.push_str(&destination[..region.start]);
        out.push_str(&self.block);
        out.push_str(&destination[region.end..]);
        Ok(out)
    }

    /// Write the artifact to `path`.
    ///
    /// The destination is written once, after the new content is fully assembled.
    /// A splice that cannot locate its region leaves the destination untouched.
    pub fn write(&self, path: impl AsRef<Path>, mode: Mode) -> Result<(), GenerateError> {
        let path = path.as_ref();
        let content = match mode {
            Mode::Overwrite => self.overwrite(),
            Mode::Splice => {
                let existing =
                    std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
                self.splice(&existing)
                    .map_err(|source| GenerateError::Region {
                        path: path.to_path_buf(),
                        source,
                    })?
            }
        };

        std::fs::write(path, content).map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), %mode, binders = self.binders, "wrote artifact");
        Ok(())
    }
}

/// The byte span of the regeneration region, sentinels inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    start: usize,
    end: usize,
}

impl Region {
    fn locate(text: &str) -> Result<Self, RegionError> {
        // (line number, byte offset)
        let mut openings: Vec<(usize, usize)> = Vec::default();
        let mut closings: Vec<(usize, usize)> = Vec::default();
        let mut offset = 0;

        for (i, line) in text.split_inclusive('\n').enumerate() {
            let indent = line.len() - line.trim_start().len();
            match line.trim() {
                REGION_OPEN => openings.push((i + 1, offset + indent)),
                REGION_CLOSE => closings.push((i + 1, offset + indent + REGION_CLOSE.len())),
                _ => {}
            }
            offset += line.len();
        }

        if openings.len() > 1 || closings.len() > 1 {
            return Err(RegionError::AmbiguousRegion {
                openings: openings.len(),
                closings: closings.len(),
            });
        }

        match (openings.first(), closings.first()) {
            (None, _) => Err(RegionError::MissingRegion),
            (Some((open_line, start)), Some((close_line, end))) if close_line > open_line => {
                Ok(Region {
                    start: *start,
                    end: *end,
                })
            }
            (Some((open_line, _)), _) => {
                Err(RegionError::UnterminatedRegion { line: *open_line })
            }
        }
    }
}
