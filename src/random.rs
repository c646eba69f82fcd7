use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::Mutex;

/// Source of uniformly distributed integers, injectable so tests can script
/// exact draw sequences.
pub trait RandomSource {
    /// Returns an integer uniformly distributed over the half-open range
    /// `[min, max)`. Callers must ensure `min < max`; draws are not
    /// re-validated here.
    fn next(&mut self, min: i32, max: i32) -> i32;
}

// One instance is created at startup and shared by all requests. Access is
// serialized through the mutex.
pub type SharedRandomSource = Arc<Mutex<dyn RandomSource + Send>>;

/// Production source backed by the thread-local generator from `rand`.
pub struct PseudoRandomSource;

impl RandomSource for PseudoRandomSource {
    fn next(&mut self, min: i32, max: i32) -> i32 {
        rand::rng().random_range(min..max)
    }
}

/// Deterministic source for tests. Each `(min, max)` range has its own
/// scripted sequence of values; once a sequence is down to its final value
/// that value is repeated for every further draw on the range.
pub struct ScriptedRandomSource {
    sequences: HashMap<(i32, i32), VecDeque<i32>>,
}

impl ScriptedRandomSource {
    pub fn new() -> ScriptedRandomSource {
        ScriptedRandomSource {
            sequences: HashMap::new(),
        }
    }

    pub fn with_sequence(mut self, min: i32, max: i32, values: &[i32]) -> ScriptedRandomSource {
        self.sequences
            .insert((min, max), values.iter().copied().collect());
        self
    }
}

impl RandomSource for ScriptedRandomSource {
    fn next(&mut self, min: i32, max: i32) -> i32 {
        let sequence = self
            .sequences
            .get_mut(&(min, max))
            .unwrap_or_else(|| panic!("no scripted sequence for range [{min}, {max})"));
        if sequence.len() > 1 {
            sequence.pop_front().expect("sequence has known length")
        } else {
            *sequence
                .front()
                .unwrap_or_else(|| panic!("empty scripted sequence for range [{min}, {max})"))
        }
    }
}
