use std::fmt::{Display, Formatter};

/// Arithmetic step of the call chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Mul,
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Add => f.write_str("+"),
            Op::Mul => f.write_str("*"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- generic errors --------------------------------------------
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    RegEx(#[from] regex::Error),

    // --------------------------------- arithmetic errors -----------------------------------------
    #[error("integer overflow: {lhs} {op} {rhs}")]
    Overflow { op: Op, lhs: i32, rhs: i32 },

    // --------------------------------- configuration errors --------------------------------------
    #[error("read config file {0}: {1}")]
    ConfigRead(String, std::io::Error),
    #[error("parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // --------------------------------- source search errors --------------------------------------
    #[error("source file {0} not found")]
    SourceNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_message() {
        let err = Error::Overflow {
            op: Op::Mul,
            lhs: i32::MAX,
            rhs: 2,
        };
        assert_eq!(err.to_string(), "integer overflow: 2147483647 * 2");
    }
}
