//! Public filter entry points.
//!
//! `apply_high_pass` and `apply_flood_fill` take one image or a collection of
//! images, run the filter on each of them independently and pass every
//! result to a [`Presenter`]. A failure on one image does not stop the
//! others; it is recorded in the returned [`ApplyReport`].

use log::warn;
use rayon::prelude::*;

use crate::config::FilterParameters;
use crate::error::TranslucifyError;
use crate::pipeline::{run, FilterKind, PixelSource, Presenter};

/// The images a filter call applies to.
///
/// Built with `ImageSelection::Single`, from a `Vec`, or by collecting any
/// iterator of sources.
#[derive(Debug)]
pub enum ImageSelection<S> {
    Single(S),
    Collection(Vec<S>),
}

impl<S> ImageSelection<S> {
    pub fn len(&self) -> usize {
        match self {
            ImageSelection::Single(_) => 1,
            ImageSelection::Collection(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<S> {
        match self {
            ImageSelection::Single(item) => vec![item],
            ImageSelection::Collection(items) => items,
        }
    }
}

impl<S> From<Vec<S>> for ImageSelection<S> {
    fn from(items: Vec<S>) -> Self {
        ImageSelection::Collection(items)
    }
}

impl<S> FromIterator<S> for ImageSelection<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ImageSelection::Collection(iter.into_iter().collect())
    }
}

/// Outcome of one filter call over a selection.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Ids handed to the presenter, in input order
    pub presented: Vec<String>,
    /// Ids that failed, with the error that stopped them
    pub failures: Vec<(String, TranslucifyError)>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Make bright pixels transparent in every selected image.
pub fn apply_high_pass<S, P>(
    selection: impl Into<ImageSelection<S>>,
    params: &FilterParameters,
    presenter: &mut P,
) -> ApplyReport
where
    S: PixelSource + Sync,
    P: Presenter + ?Sized,
{
    apply(selection, FilterKind::HighPass, params, presenter)
}

/// Remove the background connected to the top-left corner of every selected image.
pub fn apply_flood_fill<S, P>(
    selection: impl Into<ImageSelection<S>>,
    params: &FilterParameters,
    presenter: &mut P,
) -> ApplyReport
where
    S: PixelSource + Sync,
    P: Presenter + ?Sized,
{
    apply(
        selection,
        FilterKind::flood_fill_from_corner(),
        params,
        presenter,
    )
}

/// Run `kind` over every selected image and present the results.
///
/// Images are transformed in parallel batches of one image per worker
/// thread. Each batch is presented in input order before the next one is
/// decoded, so at most one batch of buffers is alive at a time.
pub fn apply<S, P>(
    selection: impl Into<ImageSelection<S>>,
    kind: FilterKind,
    params: &FilterParameters,
    presenter: &mut P,
) -> ApplyReport
where
    S: PixelSource + Sync,
    P: Presenter + ?Sized,
{
    let sources = selection.into().into_vec();
    let batch = rayon::current_num_threads().max(1);

    let mut report = ApplyReport::default();
    for chunk in sources.chunks(batch) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|source| (source.id().to_string(), run(source, kind, params)))
            .collect();

        for (id, result) in results {
            let outcome = result.and_then(|buffer| presenter.present(&id, buffer));
            match outcome {
                Ok(()) => report.presented.push(id),
                Err(err) => {
                    warn!("`{id}` skipped: {err}");
                    report.failures.push((id, err));
                }
            }
        }
    }
    report
}
