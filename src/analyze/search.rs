use super::extract::decode_source;
use crate::error::Result;
use crate::{ct_debug, weak_error};
use itertools::Itertools;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Place in a source file. `line` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub path: PathBuf,
    pub line: usize,
}

/// Source line that looks like a function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub location: Location,
    pub text: String,
}

impl Display for Definition {
    /// Same layout as `grep -rn`: `path:line:text`, line is 1-based.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.location.path.display(),
            self.location.line + 1,
            self.text
        )
    }
}

/// Searches function definitions in a source tree.
pub struct DefinitionFinder {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DefinitionFinder {
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Return all lines under the root that define a function `name`,
    /// a definition is a line like `name(<args without parens>)` at the end of the line.
    pub fn find(&self, name: &str) -> Result<Vec<Definition>> {
        let re = Regex::new(&format!(r"{}\s*\([^(]*\)\s*$", regex::escape(name)))?;
        ct_debug!(
            target: "calltrace",
            "search `{name}` in {} [{}]",
            self.root.display(),
            self.extensions.iter().join(", ")
        );

        let mut definitions = vec![];
        let entries = WalkDir::new(&self.root).sort_by_file_name().into_iter();
        for entry in entries.filter_map(|e| weak_error!(e, "walk source tree:")) {
            if !entry.file_type().is_file() || !self.is_source(entry.path()) {
                continue;
            }
            let Some(bytes) = weak_error!(std::fs::read(entry.path()), "read source file:") else {
                continue;
            };

            definitions.extend(
                decode_source(&bytes)
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| re.is_match(line))
                    .map(|(num, line)| Definition {
                        location: Location {
                            path: entry.path().to_path_buf(),
                            line: num,
                        },
                        text: line.to_string(),
                    }),
            );
        }

        Ok(definitions)
    }
}
