use std::collections::HashMap;

use tracing::{debug, debug_span, warn};

use crate::entry::Entry;
use crate::resource::ResourceCache;
use crate::settings::{Settings, SolverSettings};
use crate::solution::SolutionBuilder;
use crate::unicode::rune_len;

use super::generator::{CachedGenerator, FallbackGenerator, Generator};
use super::slice::KanjiFormSlice;
use super::state::ReadingState;

/// Left-to-right beam search over the kanji form.
///
/// At each cursor position the longest slice some generator can read wins;
/// every hypothesis in the beam is extended by every reading that generator
/// proposes for it.
pub(crate) struct IterationSolver<'a> {
    generators: Vec<Generator<'a>>,
    settings: &'a SolverSettings,
}

impl<'a> IterationSolver<'a> {
    pub fn new(cache: &'a ResourceCache, settings: &'a Settings) -> Self {
        let mut generators = vec![Generator::Cached(CachedGenerator::new(cache))];
        if settings.solver.fallback {
            generators.push(Generator::Fallback(FallbackGenerator::new(&settings.fallback)));
        }
        Self {
            generators,
            settings: &settings.solver,
        }
    }

    /// Complete hypotheses for `entry`, in generation order. Empty when the
    /// search fails or overflows. Hypotheses that differ only in guessed
    /// parts are dropped together.
    pub fn run(&self, entry: &Entry) -> Vec<SolutionBuilder> {
        let _span = debug_span!(
            "solve",
            kanji = entry.kanji_form_text(),
            reading = entry.reading_text()
        )
        .entered();

        let len = entry.len();
        let mut beam = vec![SolutionBuilder::new()];
        let mut slice_start = 0;

        while slice_start < len {
            let Some(step) = self.step(entry, &beam, slice_start) else {
                debug!(slice_start, "no generator matched");
                return Vec::new();
            };
            if step.beam.len() > self.settings.max_beam_width {
                warn!(
                    kanji = entry.kanji_form_text(),
                    width = step.beam.len(),
                    max = self.settings.max_beam_width,
                    "beam overflow, giving up"
                );
                return Vec::new();
            }
            debug!(
                generator = step.generator,
                start = slice_start,
                end = step.slice_end,
                width = step.beam.len(),
                guessed = step.guessed
            );
            beam = step.beam;
            slice_start = step.slice_end;
        }

        let reading_len = rune_len(entry.normalized_reading_text());
        beam.retain(|b| b.reading_runes() == reading_len);
        if self.settings.reject_guessed_ambiguity {
            reject_ambiguous_guesses(&mut beam);
        }
        beam
    }

    /// First (generator, slice end) that extends at least one hypothesis.
    fn step(&self, entry: &Entry, beam: &[SolutionBuilder], slice_start: usize) -> Option<Step> {
        for generator in &self.generators {
            for slice_end in (slice_start + 1..=entry.len()).rev() {
                let slice = KanjiFormSlice::new(entry, slice_start, slice_end);
                let mut next = Vec::new();
                let mut guessed = false;
                for builder in beam {
                    let state = ReadingState::new(entry, builder);
                    for continuation in generator.generate(&slice, &state) {
                        guessed |= continuation.guessed;
                        next.push(if continuation.guessed {
                            builder.extended_guess(&continuation.parts)
                        } else {
                            builder.extended(&continuation.parts)
                        });
                    }
                }
                if !next.is_empty() {
                    return Some(Step {
                        generator: generator.name(),
                        slice_end,
                        beam: next,
                        guessed,
                    });
                }
            }
        }
        None
    }
}

/// Drop every group of complete hypotheses that agree on all settled parts
/// but disagree on a guess: nothing tells which guess is right.
fn reject_ambiguous_guesses(beam: &mut Vec<SolutionBuilder>) {
    if !beam.iter().any(SolutionBuilder::has_guess) {
        return;
    }
    let keys: Vec<_> = beam.iter().map(SolutionBuilder::settled_parts).collect();
    let mut group_sizes: HashMap<&[(&str, Option<&str>)], usize> = HashMap::new();
    for key in &keys {
        *group_sizes.entry(key.as_slice()).or_default() += 1;
    }
    let keep: Vec<bool> = keys.iter().map(|k| group_sizes[k.as_slice()] == 1).collect();
    let rejected = keep.iter().filter(|k| !**k).count();
    if rejected > 0 {
        debug!(rejected, "ambiguous guesses rejected");
    }
    let mut keep = keep.into_iter();
    beam.retain(|_| keep.next().unwrap_or(false));
}

struct Step {
    generator: &'static str,
    slice_end: usize,
    beam: Vec<SolutionBuilder>,
    guessed: bool,
}
