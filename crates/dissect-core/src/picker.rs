//! Section pickers.
//!
//! Choosing the next section is the quiz's only source of randomness, so it
//! sits behind a trait. Sessions use `RandomPicker`; tests pin the choice
//! with `FixedPicker` or `ScriptedPicker`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses the section for the next round.
pub trait SectionPicker: Send {
    /// Human-readable picker name (e.g. "random").
    fn name(&self) -> &str;

    /// Pick one of `names`. `names` is never empty.
    fn pick(&mut self, names: &[&str]) -> String;
}

/// Uniform, memoryless choice. Repeats are allowed.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Deterministic picker for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl SectionPicker for RandomPicker {
    fn name(&self) -> &str {
        "random"
    }

    fn pick(&mut self, names: &[&str]) -> String {
        let idx = self.rng.random_range(0..names.len());
        names[idx].to_string()
    }
}

/// Always picks the same section.
pub struct FixedPicker {
    section: String,
}

impl FixedPicker {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
        }
    }
}

impl SectionPicker for FixedPicker {
    fn name(&self) -> &str {
        "fixed"
    }

    fn pick(&mut self, _names: &[&str]) -> String {
        self.section.clone()
    }
}

/// Plays back a script of section names, wrapping around at the end.
pub struct ScriptedPicker {
    script: Vec<String>,
    next: usize,
}

impl ScriptedPicker {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl SectionPicker for ScriptedPicker {
    fn name(&self) -> &str {
        "scripted"
    }

    fn pick(&mut self, names: &[&str]) -> String {
        // An empty script degrades to the first section.
        if self.script.is_empty() {
            return names[0].to_string();
        }
        let section = self.script[self.next % self.script.len()].clone();
        self.next += 1;
        section
    }
}
