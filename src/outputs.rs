//! Action outputs written back to the workflow.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::ui;

/// Classified kind of the tag an invocation acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagType {
    Rc,
    Ga,
    Patch,
    #[default]
    Skipped,
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TagType::Rc => "rc",
            TagType::Ga => "ga",
            TagType::Patch => "patch",
            TagType::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// Outputs reported to the calling workflow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutputs {
    pub tag: String,
    pub tag_type: TagType,
    pub major: String,
    pub minor: String,
}

impl ActionOutputs {
    /// Outputs for an event that was skipped without acting on any tag
    pub fn skipped() -> Self {
        ActionOutputs::default()
    }

    /// Append the outputs to the `GITHUB_OUTPUT` file.
    ///
    /// A missing `GITHUB_OUTPUT` variable is a warning, not a failure, so
    /// local runs outside Actions still work.
    pub fn write(&self) -> Result<()> {
        let path = match std::env::var("GITHUB_OUTPUT") {
            Ok(path) if !path.is_empty() => path,
            _ => {
                ui::display_warning("GITHUB_OUTPUT not set, outputs will not be written");
                return Ok(());
            }
        };
        self.write_to(Path::new(&path))
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "tag={}", self.tag)?;
        writeln!(file, "tag-type={}", self.tag_type)?;
        writeln!(file, "major={}", self.major)?;
        writeln!(file, "minor={}", self.minor)?;
        ui::display_debug(&format!(
            "Set outputs: tag={}, tag-type={}",
            self.tag, self.tag_type
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_type_display() {
        assert_eq!(TagType::Rc.to_string(), "rc");
        assert_eq!(TagType::Ga.to_string(), "ga");
        assert_eq!(TagType::Patch.to_string(), "patch");
        assert_eq!(TagType::Skipped.to_string(), "skipped");
    }

    #[test]
    fn test_skipped_outputs() {
        let outputs = ActionOutputs::skipped();
        assert_eq!(outputs.tag, "");
        assert_eq!(outputs.tag_type, TagType::Skipped);
    }

    #[test]
    fn test_write_to_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");

        let outputs = ActionOutputs {
            tag: "v1.2.0-rc1".to_string(),
            tag_type: TagType::Rc,
            major: "1".to_string(),
            minor: "2".to_string(),
        };
        outputs.write_to(&path).unwrap();
        outputs.write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "tag=v1.2.0-rc1");
        assert_eq!(lines[1], "tag-type=rc");
        assert_eq!(lines[2], "major=1");
        assert_eq!(lines[3], "minor=2");
    }
}
