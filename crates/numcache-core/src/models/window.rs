use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Bounded, deduplicated sequence of numbers for one category, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    current: Vec<i64>,
    previous: Vec<i64>,
}

/// Result of one window update, serialized as the `/numbers/{code}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub previous_window: Vec<i64>,
    pub current_window: Vec<i64>,
    pub retrieved_numbers: Vec<i64>,
    pub average: f64,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &[i64] {
        &self.current
    }

    pub fn previous(&self) -> &[i64] {
        &self.previous
    }

    /// Merge freshly retrieved numbers into the window.
    ///
    /// Only values absent from the current window are appended; values already
    /// present keep their position. When the result exceeds `capacity` the
    /// oldest values are evicted. `retrieved` is deduplicated first, keeping the
    /// first occurrence of each value.
    pub fn merge(&mut self, retrieved: &[i64], capacity: usize) -> WindowSnapshot {
        let retrieved = dedup(retrieved);
        let previous_window = self.current.clone();

        let present: HashSet<i64> = self.current.iter().copied().collect();
        let mut merged = self.current.clone();
        merged.extend(retrieved.iter().copied().filter(|n| !present.contains(n)));

        if merged.len() > capacity {
            let overflow = merged.len() - capacity;
            merged.drain(..overflow);
        }

        self.previous = previous_window.clone();
        self.current = merged.clone();

        WindowSnapshot {
            average: average(&merged),
            previous_window,
            current_window: merged,
            retrieved_numbers: retrieved,
        }
    }

    /// Report the window as it stands, for rounds where nothing was retrieved.
    pub fn unchanged(&self) -> WindowSnapshot {
        WindowSnapshot {
            previous_window: self.current.clone(),
            current_window: self.current.clone(),
            retrieved_numbers: Vec::new(),
            average: average(&self.current),
        }
    }
}

/// Remove repeated values, keeping the first occurrence of each.
fn dedup(numbers: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(numbers.len());
    numbers.iter().copied().filter(|n| seen.insert(*n)).collect()
}

/// Arithmetic mean rounded to two decimals, `0.0` for an empty slice.
pub fn average(numbers: &[i64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    let sum: f64 = numbers.iter().map(|&n| n as f64).sum();
    let mean = sum / numbers.len() as f64;
    (mean * 100.0).round() / 100.0
}
