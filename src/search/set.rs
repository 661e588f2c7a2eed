//! Evaluating one image against a set of templates.
//!
//! Templates are independent, so the parallel variants only distribute the
//! per-template decisions; they return the same indices as the sequential
//! variants.

use crate::hash::RegionHasher;
use crate::image::ImageView;
use crate::search::Matcher;
use crate::template::Template;
use crate::trace::trace_event;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "rayon")]
pub(super) fn first_index<H: RegionHasher + Sync>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Option<usize> {
    if matcher.config().parallel {
        first_index_par(matcher, image, templates)
    } else {
        first_index_seq(matcher, image, templates)
    }
}

#[cfg(not(feature = "rayon"))]
pub(super) fn first_index<H: RegionHasher + Sync>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Option<usize> {
    first_index_seq(matcher, image, templates)
}

#[cfg(feature = "rayon")]
pub(super) fn all_indices<H: RegionHasher + Sync>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Vec<usize> {
    if matcher.config().parallel {
        all_indices_par(matcher, image, templates)
    } else {
        all_indices_seq(matcher, image, templates)
    }
}

#[cfg(not(feature = "rayon"))]
pub(super) fn all_indices<H: RegionHasher + Sync>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Vec<usize> {
    all_indices_seq(matcher, image, templates)
}

fn first_index_seq<H: RegionHasher>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Option<usize> {
    let found = templates
        .iter()
        .position(|template| matcher.matches(image, template));
    if let Some(idx) = found {
        trace_event!("template_matched", index = idx);
    }
    found
}

fn all_indices_seq<H: RegionHasher>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Vec<usize> {
    let out: Vec<usize> = templates
        .iter()
        .enumerate()
        .filter(|(_, template)| matcher.matches(image, template))
        .map(|(idx, _)| idx)
        .collect();
    trace_event!("templates_matched", count = out.len());
    out
}

#[cfg(feature = "rayon")]
fn first_index_par<H: RegionHasher + Sync>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Option<usize> {
    let found = templates
        .par_iter()
        .position_first(|template| matcher.matches(image, template));
    if let Some(idx) = found {
        trace_event!("template_matched", index = idx);
    }
    found
}

#[cfg(feature = "rayon")]
fn all_indices_par<H: RegionHasher + Sync>(
    matcher: &Matcher<H>,
    image: ImageView<'_, u8>,
    templates: &[Template],
) -> Vec<usize> {
    let out: Vec<usize> = templates
        .par_iter()
        .enumerate()
        .filter(|(_, template)| matcher.matches(image, template))
        .map(|(idx, _)| idx)
        .collect();
    trace_event!("templates_matched", count = out.len());
    out
}
