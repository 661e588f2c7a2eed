//! Whole-image matching against templates without checkpoints.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use screenmatch::{
    format_fingerprint, AverageHasher, CheckOutcome, CheckRegion, DifferenceHasher,
    FingerprintPolicy, HashKind, ImageHash, ImageView, MatchConfig, Matcher, RegionHasher,
    ScreenMatchError, Template,
};

mod common;

use common::{image_with_dhash, upscale};

fn whole_image_template(fingerprint: &str, threshold: i32) -> Template {
    Template {
        title: "whole".to_owned(),
        fingerprint: fingerprint.to_owned(),
        threshold,
        ..Template::default()
    }
}

/// `count` low bits set: Hamming distance `count` from zero.
fn bits_at_distance(count: u32) -> u64 {
    if count == 0 {
        0
    } else {
        u64::MAX >> (64 - count)
    }
}

#[test]
fn synthetic_images_hash_to_requested_bits() {
    for bits in [0u64, 1, 0x8000_0000_0000_0000, 0xdead_beef_0bad_f00d, u64::MAX] {
        let data = image_with_dhash(bits);
        let view = ImageView::from_slice(&data, 9, 8).unwrap();
        assert_eq!(DifferenceHasher.hash(view).unwrap().bits(), bits);

        let big = upscale(&data, 9, 8, 4);
        let view = ImageView::from_slice(&big, 36, 32).unwrap();
        assert_eq!(DifferenceHasher.hash(view).unwrap().bits(), bits);
    }
}

#[test]
fn exact_hash_matches_zero_threshold() {
    let template = whole_image_template("0000000000000000", 0);
    let data = image_with_dhash(0);
    let view = ImageView::from_slice(&data, 9, 8).unwrap();
    assert!(Matcher::new().matches(view, &template));
    assert!(template.matches(view));
}

#[test]
fn distance_one_fails_zero_threshold() {
    let template = whole_image_template("0000000000000000", 0);
    let data = image_with_dhash(0x1);
    let view = ImageView::from_slice(&data, 9, 8).unwrap();
    assert!(!Matcher::new().matches(view, &template));

    let report = Matcher::new().explain(view, &template);
    assert!(!report.matched);
    assert_eq!(report.checks.len(), 1);
    assert_eq!(report.checks[0].region, CheckRegion::Whole);
    assert_eq!(report.checks[0].distance(), Some(1));
    assert_eq!(report.checks[0].limit, 0);
}

#[test]
fn threshold_bounds_whole_image_distance() {
    let template = whole_image_template("0000000000000000", 5);
    let matcher = Matcher::new();

    for (distance, expected) in [(4, true), (5, true), (6, false)] {
        let data = image_with_dhash(bits_at_distance(distance));
        let view = ImageView::from_slice(&data, 9, 8).unwrap();
        assert_eq!(
            matcher.matches(view, &template),
            expected,
            "distance {distance}"
        );
    }
}

#[test]
fn match_hash_compares_against_threshold() {
    let template = whole_image_template("00000000000000ff", 2);
    assert!(template.match_hash(&ImageHash::difference(0xff)));
    assert!(template.match_hash(&ImageHash::difference(0xfc)));
    assert!(!template.match_hash(&ImageHash::difference(0xf8)));
}

#[test]
fn mismatched_hash_kind_never_matches() {
    let template = whole_image_template("0000000000000000", 64);
    let foreign = ImageHash::new(0, HashKind::Average);
    assert!(!Matcher::new().match_hash(&foreign, &template));

    let data = image_with_dhash(0);
    let view = ImageView::from_slice(&data, 9, 8).unwrap();
    let report = Matcher::with_hasher(AverageHasher).explain(view, &template);
    assert!(!report.matched);
    assert_eq!(
        report.checks[0].outcome,
        CheckOutcome::Error(ScreenMatchError::HashKindMismatch {
            left: HashKind::Difference,
            right: HashKind::Average,
        })
    );
}

#[test]
fn negative_threshold_never_matches() {
    let template = whole_image_template("0000000000000000", -1);
    let data = image_with_dhash(0);
    let view = ImageView::from_slice(&data, 9, 8).unwrap();
    assert!(!template.matches(view));
}

#[test]
fn malformed_whole_fingerprint_never_matches() {
    let template = whole_image_template("zz", 64);
    let data = image_with_dhash(0);
    let view = ImageView::from_slice(&data, 9, 8).unwrap();

    // Decodes to the zero hash, yet a flat screen must not match it.
    assert_eq!(template.hash().bits(), 0);

    for policy in [FingerprintPolicy::Lenient, FingerprintPolicy::Strict] {
        let matcher = Matcher::new().with_config(MatchConfig {
            fingerprint_policy: policy,
            ..MatchConfig::default()
        });
        assert!(!matcher.matches(view, &template), "{policy:?}");
        assert!(!matcher.match_hash(&ImageHash::difference(0), &template));

        let report = matcher.explain(view, &template);
        assert!(!report.matched);
        assert_eq!(
            report.checks[0].outcome,
            CheckOutcome::Error(ScreenMatchError::InvalidFingerprint {
                fingerprint: "zz".to_owned(),
            })
        );
    }
}

#[test]
fn template_without_fingerprint_never_matches() {
    let template = Template {
        title: "no fingerprint".to_owned(),
        threshold: 64,
        ..Template::default()
    };
    let blank = vec![0u8; 64 * 48];
    let view = ImageView::from_slice(&blank, 64, 48).unwrap();

    assert!(!template.matches(view));
    assert_eq!(
        Matcher::new().explain(view, &template).failure().map(|c| &c.outcome),
        Some(&CheckOutcome::Error(ScreenMatchError::InvalidFingerprint {
            fingerprint: String::new(),
        }))
    );
}

#[test]
fn decision_follows_hamming_distance() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let matcher = Matcher::new();

    for _ in 0..200 {
        let image_bits: u64 = rng.random();
        let template_bits: u64 = if rng.random_bool(0.5) {
            image_bits ^ (1u64 << rng.random_range(0..64u32))
        } else {
            rng.random()
        };
        let threshold: i32 = rng.random_range(0..=40);
        let template = whole_image_template(&format_fingerprint(template_bits), threshold);

        let data = image_with_dhash(image_bits);
        let view = ImageView::from_slice(&data, 9, 8).unwrap();
        let distance = (image_bits ^ template_bits).count_ones() as i32;

        let first = matcher.matches(view, &template);
        assert_eq!(first, distance <= threshold);
        assert_eq!(matcher.matches(view, &template), first);
        assert_eq!(matcher.explain(view, &template).matched, first);
    }
}
