use crate::ct_error;
use once_cell::sync;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

/// C keywords and libc routines never reported as calls.
pub const RESERVED_WORDS: &[&str] = &[
    "if", "else", "while", "for", "do", "switch", "case", "default", "return", "break",
    "continue", "goto", "sizeof", "typedef", "struct", "union", "enum", "const", "volatile",
    "static", "extern", "auto", "register", "inline", "restrict", "signed", "unsigned", "int",
    "char", "short", "long", "float", "double", "void", "printf", "scanf", "malloc", "free",
    "memcpy", "strcpy", "strlen", "strcmp", "strcat", "fopen", "fclose", "fread", "fwrite",
    "fprintf", "fscanf", "assert",
];

/// Decode source text, invalid UTF-8 sequences are dropped.
pub(super) fn decode_source(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Names used inside a single function body.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Calls {
    pub functions: BTreeSet<String>,
    pub macros: BTreeSet<String>,
}

impl Calls {
    /// Scan a function body. `def_line` is the 0-based line of the function signature,
    /// the body starts right after it and ends at the first line beginning with `}`.
    pub fn from_source(source: &str, def_line: usize) -> Self {
        static FUNC_RE: sync::Lazy<Regex> =
            sync::Lazy::new(|| Regex::new(r"(\w+)\s*\(").expect("must compile"));
        static MACRO_RE: sync::Lazy<Regex> =
            sync::Lazy::new(|| Regex::new(r"[A-Z_][A-Z_\d]*").expect("must compile"));

        let mut calls = Calls::default();

        for line in source.lines().skip(def_line + 1) {
            if line.trim_start().starts_with('}') {
                break;
            }

            let stripped = line.trim();
            if stripped.starts_with("//") || stripped.starts_with("/*") {
                continue;
            }

            for (_, [name]) in FUNC_RE.captures_iter(line).map(|c| c.extract()) {
                if !is_reserved(name) {
                    calls.functions.insert(name.to_string());
                }
            }

            if !stripped.starts_with("#define") {
                for m in MACRO_RE.find_iter(line) {
                    let name = m.as_str();
                    if name.len() > 1 && !is_reserved(name) {
                        calls.macros.insert(name.to_string());
                    }
                }
            }
        }

        calls
    }

    /// Read the file and scan the body of the function defined at `def_line`.
    /// An unreadable file yields no calls.
    pub fn from_file(path: &Path, def_line: usize) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => Self::from_source(&decode_source(&bytes), def_line),
            Err(e) => {
                ct_error!(target: "calltrace", "reading file {}: {e}", path.display());
                Calls::default()
            }
        }
    }
}
