//! Layered call chain: `entry -> level1 -> level2 -> level3`.
//!
//! Each level performs one arithmetic step on an `i32`. `level2` writes a
//! debug line and `entry` writes the result line, so a single call produces:
//!
//! ```text
//! Debug: <n + 10>
//! Result: <(n + 10) * 2>
//! ```

use crate::error::{Error, Op, Result};
use serde::Deserialize;
use std::io::Write;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Offset added by [`level3`].
pub const OFFSET: i32 = 10;
/// Factor applied by [`level1`].
pub const FACTOR: i32 = 2;

/// What to do when a step leaves the `i32` range.
#[derive(
    Copy, Clone, Default, PartialEq, Eq, Debug, Deserialize, EnumString, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OverflowPolicy {
    /// Fail with [`Error::Overflow`].
    #[default]
    Checked,
    /// Two's-complement wraparound.
    Wrapping,
    /// Clamp to `i32::MIN` / `i32::MAX`.
    Saturating,
}

impl OverflowPolicy {
    pub fn add(self, lhs: i32, rhs: i32) -> Result<i32> {
        match self {
            OverflowPolicy::Checked => lhs.checked_add(rhs).ok_or(Error::Overflow {
                op: Op::Add,
                lhs,
                rhs,
            }),
            OverflowPolicy::Wrapping => Ok(lhs.wrapping_add(rhs)),
            OverflowPolicy::Saturating => Ok(lhs.saturating_add(rhs)),
        }
    }

    pub fn mul(self, lhs: i32, rhs: i32) -> Result<i32> {
        match self {
            OverflowPolicy::Checked => lhs.checked_mul(rhs).ok_or(Error::Overflow {
                op: Op::Mul,
                lhs,
                rhs,
            }),
            OverflowPolicy::Wrapping => Ok(lhs.wrapping_mul(rhs)),
            OverflowPolicy::Saturating => Ok(lhs.saturating_mul(rhs)),
        }
    }
}

/// The call chain bound to an overflow policy.
#[derive(Copy, Clone, Default, Debug)]
pub struct Chain {
    policy: OverflowPolicy,
}

impl Chain {
    pub fn new(policy: OverflowPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn level3(&self, x: i32) -> Result<i32> {
        self.policy.add(x, OFFSET)
    }

    pub fn level2(&self, out: &mut impl Write, x: i32) -> Result<i32> {
        let result = self.level3(x)?;
        writeln!(out, "Debug: {result}")?;
        Ok(result)
    }

    pub fn level1(&self, out: &mut impl Write, x: i32) -> Result<i32> {
        let result = self.level2(out, x)?;
        self.policy.mul(result, FACTOR)
    }

    /// Run the whole chain for `n`, writing the debug and result lines into `out`.
    pub fn entry(&self, out: &mut impl Write, n: i32) -> Result<i32> {
        let result = self.level1(out, n)?;
        writeln!(out, "Result: {result}")?;
        Ok(result)
    }

    /// Same as [`Chain::entry`] but prints into the process stdout.
    pub fn run(&self, n: i32) -> Result<i32> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        let result = self.entry(&mut lock, n)?;
        lock.flush()?;
        Ok(result)
    }
}

pub fn level3(x: i32) -> Result<i32> {
    Chain::default().level3(x)
}

pub fn level2(out: &mut impl Write, x: i32) -> Result<i32> {
    Chain::default().level2(out, x)
}

pub fn level1(out: &mut impl Write, x: i32) -> Result<i32> {
    Chain::default().level1(out, x)
}

pub fn entry(out: &mut impl Write, n: i32) -> Result<i32> {
    Chain::default().entry(out, n)
}

pub fn run(n: i32) -> Result<i32> {
    Chain::default().run(n)
}
