//! Call graph walker for C sources.
//!
//! Starting from a function definition, prints a `caller callee` line for every
//! function or macro used in the body, then descends into callees whose
//! definition is found exactly once in the source tree. Ambiguous callees are
//! reported as raw `path:line:text` matches and not descended into.

mod extract;
mod search;

pub use extract::{Calls, RESERVED_WORDS};
pub use search::{Definition, DefinitionFinder, Location};

use crate::ct_debug;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

/// Print the call graph of function `name` whose definition is on the 1-based `line` of `file`.
pub fn run(
    name: &str,
    file: &Path,
    line: usize,
    finder: DefinitionFinder,
    out: impl Write,
) -> Result<()> {
    if !file.exists() {
        return Err(Error::SourceNotFound(file.display().to_string()));
    }

    let location = Location {
        path: file.to_path_buf(),
        line: line.saturating_sub(1),
    };
    let mut analyzer = Analyzer::new(finder, out);
    analyzer.analyze(name, location)?;
    analyzer.out.flush()?;
    Ok(())
}

pub struct Analyzer<W: Write> {
    finder: DefinitionFinder,
    out: W,
    visited: HashSet<(String, Location)>,
}

impl<W: Write> Analyzer<W> {
    pub fn new(finder: DefinitionFinder, out: W) -> Self {
        Self {
            finder,
            out,
            visited: HashSet::new(),
        }
    }

    /// Walk the calls of function `name` defined at `location`.
    pub fn analyze(&mut self, name: &str, location: Location) -> Result<()> {
        let key = (name.to_string(), location);
        if !self.visited.insert(key.clone()) {
            return Ok(());
        }
        let (_, location) = key;
        ct_debug!(
            target: "calltrace",
            "analyze `{name}` at {}:{}",
            location.path.display(),
            location.line + 1
        );

        let calls = Calls::from_file(&location.path, location.line);

        let mut emitted = HashSet::new();
        for macro_name in &calls.macros {
            if emitted.insert(macro_name.as_str()) {
                writeln!(self.out, "{name} {macro_name}")?;
            }
        }

        for callee in &calls.functions {
            if emitted.insert(callee.as_str()) {
                writeln!(self.out, "{name} {callee}")?;
            }

            match self.finder.find(callee)?.as_slice() {
                [] => {}
                [definition] => self.analyze(callee, definition.location.clone())?,
                definitions => {
                    for definition in definitions {
                        writeln!(self.out, "{definition}")?;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"#include <stdio.h>

#define MAX_SIZE 100
#define PRINT_DEBUG(x) printf("Debug: %d\n", x)

int level3_func(int x)
{
    return x + 10;
}

int level2_func(int x)
{
    int result = level3_func(x);
    PRINT_DEBUG(result);
    return result;
}

int level1_func(int x)
{
    int result = level2_func(x);
    return result * 2;
}

int main_func(int n)
{
    int result = level1_func(n);
    printf("Result: %d\n", result);
    return result;
}
"#;

    fn source_tree(files: &[(&str, &str)]) -> PathBuf {
        let root = std::env::temp_dir().join(uuid::Uuid::new_v4().to_string());
        for (name, content) in files {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        root
    }

    fn analyze(root: &PathBuf, name: &str, file: &str, line: usize) -> String {
        let finder = DefinitionFinder::new(root, vec!["c".to_string(), "h".to_string()]);
        let mut analyzer = Analyzer::new(finder, Vec::new());
        let location = Location {
            path: root.join(file),
            line,
        };
        analyzer.analyze(name, location).unwrap();
        String::from_utf8(analyzer.into_inner()).unwrap()
    }

    #[test]
    fn test_layered_calls() {
        let root = source_tree(&[("test_recursive.c", SAMPLE)]);

        let output = analyze(&root, "main_func", "test_recursive.c", 23);
        assert_eq!(
            output,
            "main_func level1_func\n\
             level1_func level2_func\n\
             level2_func PRINT_DEBUG\n\
             level2_func level3_func\n"
        );

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_run_missing_file() {
        let finder = DefinitionFinder::new(".", vec!["c".to_string()]);
        let result = run("f", Path::new("/no/such/file.c"), 1, finder, Vec::new());
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
    }

    #[test]
    fn test_self_recursion_edge() {
        let source = "int fact(int n)\n{\n    return n * fact(n - 1) + helper(n);\n}\n";
        let root = source_tree(&[("r.c", source)]);

        let output = analyze(&root, "fact", "r.c", 0);
        assert_eq!(output, "fact fact\nfact helper\n");

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_mutual_recursion_terminates() {
        let source = "void ping(int n)\n{\n    pong(n);\n}\n\nvoid pong(int n)\n{\n    ping(n);\n}\n";
        let root = source_tree(&[("p.c", source)]);

        let output = analyze(&root, "ping", "p.c", 0);
        assert_eq!(output, "ping pong\npong ping\n");

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_ambiguous_definitions() {
        let root = source_tree(&[
            ("main.c", "int run(void)\n{\n    helper();\n}\n"),
            ("x/one.c", "void helper()\n{\n    inner();\n}\n"),
            ("x/two.c", "void helper()\n{\n}\n"),
        ]);

        let output = analyze(&root, "run", "main.c", 0);
        assert_eq!(
            output,
            format!(
                "run helper\n{0}:1:void helper()\n{1}:1:void helper()\n",
                root.join("x/one.c").display(),
                root.join("x/two.c").display()
            )
        );

        fs::remove_dir_all(root).unwrap();
    }
}
