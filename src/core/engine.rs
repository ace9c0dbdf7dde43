// File: src/core/engine.rs
use crate::config::GenerationConfig;
use crate::core::context::ContextModel;
use crate::core::source::WordSource;
use crate::core::syllables::SyllableCache;
use crate::core::types::{Candidate, Line, LineTarget, Mode, Poem, Stanza, StanzaShape};
use crate::error::{PoetError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// A single `compose` call: the stanza layout and how many stanzas to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeRequest {
    pub shape: StanzaShape,
    pub stanzas: usize,
    /// Switch to contextual mode first when a context model is present.
    pub force_contextual: bool,
}

impl ComposeRequest {
    pub fn new(shape: StanzaShape, stanzas: usize) -> Self {
        Self {
            shape,
            stanzas,
            force_contextual: false,
        }
    }
}

// The poet chains words drawn from whichever source the current mode selects.
// The last word written carries over from one line (and one poem) to the next.
pub struct Poet {
    context: Option<ContextModel>,
    service: Option<Box<dyn WordSource>>,
    mode: Mode,
    rng: StdRng,
    settings: GenerationConfig,
    last_seen_word: Option<String>,
}

impl Poet {
    pub fn new(
        context: Option<ContextModel>,
        service: Option<Box<dyn WordSource>>,
        settings: GenerationConfig,
    ) -> Result<Self> {
        settings.validate()?;
        let mode = match (&context, &service) {
            (Some(_), _) => Mode::Contextual,
            (None, Some(_)) => Mode::Free,
            (None, None) => return Err(PoetError::NoWordSource),
        };
        if context.as_ref().is_some_and(ContextModel::is_empty) {
            warn!("context model is empty; contextual poems cannot be composed");
        }
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!("{} mode", mode);
        Ok(Self {
            context,
            service,
            mode,
            rng,
            settings,
            last_seen_word: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn has_source(&self, mode: Mode) -> bool {
        match mode {
            Mode::Contextual => self.context.is_some(),
            Mode::Free => self.service.is_some(),
        }
    }

    /// Switches to `mode`. The word chain restarts because the sources differ.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if !self.has_source(mode) {
            return Err(PoetError::ModeUnavailable(mode));
        }
        if self.mode != mode {
            self.mode = mode;
            self.last_seen_word = None;
            info!("{} mode", mode);
        }
        Ok(())
    }

    pub fn toggle_mode(&mut self) -> Result<Mode> {
        let next = match self.mode {
            Mode::Contextual => Mode::Free,
            Mode::Free => Mode::Contextual,
        };
        self.set_mode(next)?;
        Ok(next)
    }

    /// Composes a poem of `request.stanzas` stanzas shaped by `request.shape`.
    ///
    /// Syllable estimates are read through `cache`, which the caller keeps
    /// across calls to avoid recounting words.
    pub fn compose(&mut self, request: &ComposeRequest, cache: &mut SyllableCache) -> Result<Poem> {
        if request.force_contextual && self.context.is_some() {
            self.set_mode(Mode::Contextual)?;
        }
        self.validate(&request.shape)?;

        let mut poem = Poem::default();
        for _ in 0..request.stanzas {
            let stanza = self.generate_stanza(&request.shape, cache)?;
            poem.stanzas.push(stanza);
        }
        info!(
            stanzas = poem.stanzas.len(),
            lines = poem.lines().count(),
            cached_words = cache.len(),
            "poem composed"
        );
        Ok(poem)
    }

    fn validate(&self, shape: &StanzaShape) -> Result<()> {
        match shape {
            StanzaShape::Words {
                lines_per_stanza,
                words_per_line,
            } => {
                if *lines_per_stanza == 0 || *words_per_line == 0 {
                    return Err(PoetError::InvalidShape(format!(
                        "stanzas need at least one line of at least one word, got {lines_per_stanza} lines of {words_per_line} words"
                    )));
                }
            }
            StanzaShape::Meter(meter) => {
                if meter.is_empty() {
                    return Err(PoetError::InvalidShape(
                        "meter must list at least one syllable count".into(),
                    ));
                }
                let min = self.settings.min_line_syllables;
                if let Some(short) = meter.iter().find(|&&s| s < min) {
                    return Err(PoetError::InvalidShape(format!(
                        "all lines must have {min} or more syllables, got {short}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn generate_stanza(&mut self, shape: &StanzaShape, cache: &mut SyllableCache) -> Result<Stanza> {
        let lines = shape
            .line_targets()
            .into_iter()
            .map(|target| self.generate_line(target, cache))
            .collect::<Result<Vec<_>>>()?;
        Ok(Stanza { lines })
    }

    /// Generates one line, retrying from the same chain position on dead ends.
    pub fn generate_line(&mut self, target: LineTarget, cache: &mut SyllableCache) -> Result<Line> {
        let checkpoint = self.last_seen_word.clone();
        for attempt in 1..=self.settings.max_attempts {
            if let Some(words) = self.try_line(target, cache)? {
                return Ok(Line { words });
            }
            debug!(attempt, %target, "line hit a dead end, retrying");
            self.last_seen_word = checkpoint.clone();
        }
        Err(PoetError::Exhausted {
            attempts: self.settings.max_attempts,
            target: target.to_string(),
        })
    }

    fn try_line(&mut self, target: LineTarget, cache: &mut SyllableCache) -> Result<Option<Vec<String>>> {
        let mut words = Vec::new();
        match target {
            LineTarget::Words(count) => {
                while words.len() < count {
                    let Some(word) = self.next_word(None, cache)? else {
                        return Ok(None);
                    };
                    words.push(word);
                }
            }
            LineTarget::Syllables(count) => {
                let mut remaining = count;
                while remaining > 0 {
                    let Some(word) = self.next_word(Some(remaining), cache)? else {
                        return Ok(None);
                    };
                    remaining -= cache.count(&word);
                    words.push(word);
                }
            }
        }
        Ok(Some(words))
    }

    /// Picks the word that follows the chain, restarting it when no follower fits.
    fn next_word(&mut self, budget: Option<usize>, cache: &mut SyllableCache) -> Result<Option<String>> {
        if let Some(previous) = self.last_seen_word.clone() {
            let candidates = self.source()?.next_words(&previous)?;
            if let Some(word) = self.pick(candidates, budget, cache) {
                self.last_seen_word = Some(word.clone());
                return Ok(Some(word));
            }
            debug!(%previous, ?budget, "no fitting follower, restarting chain");
        }

        let candidates = self.source()?.starting_words()?;
        let word = self.pick(candidates, budget, cache);
        if word.is_some() {
            self.last_seen_word = word.clone();
        }
        Ok(word)
    }

    fn pick(
        &mut self,
        candidates: Vec<Candidate>,
        budget: Option<usize>,
        cache: &mut SyllableCache,
    ) -> Option<String> {
        let fitting: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| {
                let syllables = cache.count(&c.word);
                syllables >= 1 && budget.map_or(true, |b| syllables <= b)
            })
            .collect();
        if fitting.is_empty() {
            return None;
        }
        let dist = WeightedIndex::new(fitting.iter().map(|c| c.weight.max(1))).ok()?;
        Some(fitting[dist.sample(&mut self.rng)].word.clone())
    }

    fn source(&mut self) -> Result<&mut dyn WordSource> {
        match self.mode {
            Mode::Contextual => match self.context.as_mut() {
                Some(context) => Ok(context as &mut dyn WordSource),
                None => Err(PoetError::ModeUnavailable(Mode::Contextual)),
            },
            Mode::Free => match self.service.as_mut() {
                Some(service) => Ok(&mut **service),
                None => Err(PoetError::ModeUnavailable(Mode::Free)),
            },
        }
    }
}
