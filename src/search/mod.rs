//! Match decisions for screenshots against templates.
//!
//! A template without checkpoints matches when its fingerprint is well-formed
//! and the Hamming distance between the image hash and that fingerprint is at
//! most `threshold`. A
//! template with checkpoints matches when every checkpoint region hashes to
//! within [`CHECKPOINT_MAX_DISTANCE`] of its fingerprint; evaluation stops at
//! the first failing checkpoint.
//!
//! Matching never returns an error. Crop, hash and distance failures all
//! resolve to a non-match so a caller probing many templates is not aborted
//! by one broken template. [`Matcher::explain`] exposes those failures.

use crate::hash::{parse_fingerprint, DifferenceHasher, ImageHash, RegionHasher};
use crate::image::ImageView;
use crate::template::{Checkpoint, FingerprintPolicy, Template};
use crate::trace::{trace_debug, trace_span, trace_warn};
use crate::util::ScreenMatchResult;

mod report;
mod set;

pub use report::{Check, CheckOutcome, CheckRegion, MatchReport};

/// Largest Hamming distance accepted for a checkpoint region.
pub const CHECKPOINT_MAX_DISTANCE: i32 = 1;

/// Matcher configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchConfig {
    /// Evaluate template sets on the rayon pool (requires the `rayon`
    /// feature; ignored otherwise).
    pub parallel: bool,
    /// Treatment of malformed checkpoint fingerprints at match time.
    pub fingerprint_policy: FingerprintPolicy,
}

/// Stateless matcher over a pluggable region hasher.
#[derive(Clone, Debug)]
pub struct Matcher<H = DifferenceHasher> {
    hasher: H,
    config: MatchConfig,
}

impl Matcher {
    /// Creates a matcher using the difference hash and default config.
    pub fn new() -> Self {
        Self::with_hasher(DifferenceHasher)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: RegionHasher> Matcher<H> {
    /// Creates a matcher that hashes regions with `hasher`.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            config: MatchConfig::default(),
        }
    }

    /// Replaces the matcher configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the region hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Decides whether `image` matches `template`.
    pub fn matches(&self, image: ImageView<'_, u8>, template: &Template) -> bool {
        self.evaluate(image, template, |_| {})
    }

    /// Same decision as [`Matcher::matches`], with the evaluated checks.
    pub fn explain(&self, image: ImageView<'_, u8>, template: &Template) -> MatchReport {
        let mut checks = Vec::new();
        let matched = self.evaluate(image, template, |check| checks.push(check));
        MatchReport { matched, checks }
    }

    /// Decides whether a whole-image hash is within the template threshold.
    ///
    /// Checkpoints are not consulted. An absent or malformed fingerprint never
    /// matches, whatever the fingerprint policy.
    pub fn match_hash(&self, hash: &ImageHash, template: &Template) -> bool {
        self.whole_check(hash, template).passed()
    }

    /// Returns the first template in `templates` that `image` matches.
    pub fn find_first<'t>(
        &self,
        image: ImageView<'_, u8>,
        templates: &'t [Template],
    ) -> Option<&'t Template>
    where
        H: Sync,
    {
        let _span = trace_span!("find_first", templates = templates.len()).entered();
        set::first_index(self, image, templates).map(|idx| &templates[idx])
    }

    /// Returns every template `image` matches, in declaration order.
    pub fn find_all<'t>(
        &self,
        image: ImageView<'_, u8>,
        templates: &'t [Template],
    ) -> Vec<&'t Template>
    where
        H: Sync,
    {
        let _span = trace_span!("find_all", templates = templates.len()).entered();
        set::all_indices(self, image, templates)
            .into_iter()
            .map(|idx| &templates[idx])
            .collect()
    }

    fn evaluate(
        &self,
        image: ImageView<'_, u8>,
        template: &Template,
        mut record: impl FnMut(Check),
    ) -> bool {
        let _span = trace_span!(
            "matches",
            title = template.title.as_str(),
            checkpoints = template.checkpoints.len()
        )
        .entered();

        if template.checkpoints.is_empty() {
            let check = match self.hasher.hash(image) {
                Ok(hash) => self.whole_check(&hash, template),
                Err(err) => Check::new(
                    CheckRegion::Whole,
                    CheckOutcome::Error(err),
                    template.threshold,
                ),
            };
            let passed = check.passed();
            record(check);
            return passed;
        }

        for (index, checkpoint) in template.checkpoints.iter().enumerate() {
            let check = self.checkpoint_check(image, index, checkpoint);
            let passed = check.passed();
            record(check);
            if !passed {
                trace_debug!(
                    "checkpoint does not match",
                    index = index,
                    fingerprint = checkpoint.fingerprint.as_str(),
                );
                return false;
            }
        }
        true
    }

    fn whole_check(&self, hash: &ImageHash, template: &Template) -> Check {
        let result =
            whole_fingerprint(&template.fingerprint).and_then(|expected| expected.distance(hash));
        let outcome = match result {
            Ok(distance) => {
                trace_debug!(
                    "whole-image distance",
                    hash = hash.bits(),
                    distance = distance,
                    threshold = template.threshold,
                );
                CheckOutcome::Distance(distance)
            }
            Err(err) => CheckOutcome::Error(err),
        };
        Check::new(CheckRegion::Whole, outcome, template.threshold)
    }

    fn checkpoint_check(
        &self,
        image: ImageView<'_, u8>,
        index: usize,
        checkpoint: &Checkpoint,
    ) -> Check {
        let result = checkpoint
            .hash(self.config.fingerprint_policy)
            .and_then(|expected| {
                let region = checkpoint.region(image)?;
                let actual = self.hasher.hash(region)?;
                let distance = actual.distance(&expected)?;
                if distance > 0 {
                    trace_debug!(
                        "checkpoint distance",
                        index = index,
                        expected = expected.bits(),
                        actual = actual.bits(),
                        distance = distance,
                    );
                }
                Ok(distance)
            });
        let outcome = match result {
            Ok(distance) => CheckOutcome::Distance(distance),
            Err(err) => CheckOutcome::Error(err),
        };
        Check::new(
            CheckRegion::Checkpoint {
                index,
                crop: checkpoint.crop,
            },
            outcome,
            CHECKPOINT_MAX_DISTANCE,
        )
    }
}

/// Decodes the whole-image fingerprint, which must be well-formed under every
/// policy.
fn whole_fingerprint(fingerprint: &str) -> ScreenMatchResult<ImageHash> {
    parse_fingerprint(fingerprint)
        .map(ImageHash::difference)
        .inspect_err(|_| {
            trace_warn!(
                "malformed whole-image fingerprint never matches",
                fingerprint = fingerprint,
            );
        })
}
