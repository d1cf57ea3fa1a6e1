//! Selection strategy for placeholder assignments.
//!
//! Doctor and outcome values are drawn from fixed rosters; which entry gets
//! picked carries no meaning, so the strategy is injected and tests swap in
//! [`FixedPicker`].

use rand::seq::SliceRandom;

/// Picks one entry from a fixed roster.
pub trait Picker {
    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str;
}

/// Uniform random pick, the production strategy.
#[derive(Debug, Default)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str {
        options.choose(&mut rand::thread_rng()).copied().unwrap_or("")
    }
}

/// Always picks the same roster index (modulo length), for deterministic
/// tests.
#[derive(Debug, Default)]
pub struct FixedPicker {
    pub index: usize,
}

impl FixedPicker {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Picker for FixedPicker {
    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str {
        if options.is_empty() {
            return "";
        }
        options[self.index % options.len()]
    }
}
