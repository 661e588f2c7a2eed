//! Diagnostic trace of a match decision.

use crate::template::Crop;
use crate::util::ScreenMatchError;

/// Which part of the template a check compared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckRegion {
    /// The whole image against the template fingerprint.
    Whole,
    /// One checkpoint, by declaration index.
    Checkpoint { index: usize, crop: Option<Crop> },
}

/// Result of comparing one region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Hamming distance between the computed and declared hashes.
    Distance(u32),
    /// The region could not be cropped, hashed or compared.
    Error(ScreenMatchError),
}

/// One evaluated comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Check {
    pub region: CheckRegion,
    pub outcome: CheckOutcome,
    /// Largest distance that still passes.
    pub limit: i32,
}

impl Check {
    pub(crate) fn new(region: CheckRegion, outcome: CheckOutcome, limit: i32) -> Self {
        Self {
            region,
            outcome,
            limit,
        }
    }

    /// Returns true when the distance is within `limit`.
    pub fn passed(&self) -> bool {
        match self.outcome {
            CheckOutcome::Distance(distance) => i64::from(distance) <= i64::from(self.limit),
            CheckOutcome::Error(_) => false,
        }
    }

    /// Returns the measured distance, if the comparison ran.
    pub fn distance(&self) -> Option<u32> {
        match self.outcome {
            CheckOutcome::Distance(distance) => Some(distance),
            CheckOutcome::Error(_) => None,
        }
    }
}

/// Boolean decision plus the checks that led to it.
///
/// Checks stop at the first failure, so a failed report ends with the
/// failing check and later checkpoints are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub matched: bool,
    pub checks: Vec<Check>,
}

impl MatchReport {
    /// Returns the check that caused a non-match, if any.
    pub fn failure(&self) -> Option<&Check> {
        self.checks.iter().find(|check| !check.passed())
    }
}
