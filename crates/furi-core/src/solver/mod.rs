//! Furigana solving: split an entry's reading across its kanji form.
//!
//! [`Solver`] owns a shared [`ResourceCache`] and a copy of the settings;
//! [`Solver::solve`] returns a lazy iterator over every valid segmentation.
//! No solution is an ordinary outcome, not an error.

pub mod generator;
mod iteration;
pub mod slice;
pub mod state;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::warn;

use crate::entry::Entry;
use crate::resource::ResourceCache;
use crate::settings::{settings, Settings};
use crate::solution::{Solution, SolutionBuilder};

use iteration::IterationSolver;

pub struct Solver {
    cache: Arc<ResourceCache>,
    settings: Settings,
}

impl Solver {
    /// Solver using the process-wide settings.
    pub fn new(cache: Arc<ResourceCache>) -> Self {
        Self::with_settings(cache, settings().clone())
    }

    pub fn with_settings(cache: Arc<ResourceCache>, settings: Settings) -> Self {
        Self { cache, settings }
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Every solution for `entry`. The search runs on the first call to
    /// `next`; call `solve` again to restart.
    pub fn solve<'s, 'e>(&'s self, entry: &'e Entry) -> Solutions<'s, 'e> {
        Solutions {
            solver: self,
            entry,
            pending: None,
        }
    }
}

/// Lazy sequence of solutions for one entry.
pub struct Solutions<'s, 'e> {
    solver: &'s Solver,
    entry: &'e Entry,
    pending: Option<std::vec::IntoIter<SolutionBuilder>>,
}

impl<'e> Iterator for Solutions<'_, 'e> {
    type Item = Solution<'e>;

    fn next(&mut self) -> Option<Solution<'e>> {
        let solver = self.solver;
        let entry = self.entry;
        let pending = self.pending.get_or_insert_with(|| {
            IterationSolver::new(&solver.cache, &solver.settings)
                .run(entry)
                .into_iter()
        });
        for builder in pending.by_ref() {
            match builder.build(entry) {
                Ok(solution) => return Some(solution),
                Err(e) => warn!(kanji = entry.kanji_form_text(), error = %e, "discarding invalid solution"),
            }
        }
        None
    }
}
