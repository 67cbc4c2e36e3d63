//! Named Counter Accumulators.
//!
//! This module implements the generic counter manager used by the disk
//! facade and the memory controller. A counter is addressed by a small
//! stable id and carries a human-readable name plus a numeric value.
//! Counters come in two kinds:
//!
//! * **Stored** counters are plain accumulators that can be pegged and
//!   reset.
//! * **Ratio** counters are read-only: their value is computed on demand
//!   as `numerator / denominator` over two other counters, guarded against
//!   division by zero. Pegging or resetting a ratio counter is a silent
//!   no-op.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Identifier type for counters.
///
/// Ids are small, stable integers chosen by the owning component; they are
/// only unique within one [`CounterManager`].
pub type CounterId = u16;

/// Counter kind: a plain accumulator or a derived ratio.
#[derive(Debug, Clone)]
enum CounterKind {
    /// Directly pegged value.
    Stored,

    /// Read-only value computed as `numerator / denominator` on demand.
    Ratio {
        numerator: CounterId,
        denominator: CounterId,
    },
}

/// One named counter slot.
#[derive(Debug, Clone)]
struct Counter {
    name: String,
    value: f64,
    kind: CounterKind,
}

/// Keyed collection of named numeric accumulators.
///
/// Value type: freely cloned and reset, never shared between device stacks.
#[derive(Debug, Clone)]
pub struct CounterManager {
    /// Label identifying the owning component in snapshots and logs.
    label: String,
    counters: BTreeMap<CounterId, Counter>,
}

impl CounterManager {
    /// Creates an empty manager.
    ///
    /// # Arguments
    ///
    /// * `label` - Name of the owning component (used in snapshots/logs).
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            counters: BTreeMap::new(),
        }
    }

    /// Registers a stored counter under `id`.
    ///
    /// Registering an id twice keeps the original counter and logs a
    /// warning.
    pub fn add_counter(&mut self, id: CounterId, name: impl Into<String>) {
        self.insert(
            id,
            Counter {
                name: name.into(),
                value: 0.0,
                kind: CounterKind::Stored,
            },
        );
    }

    /// Registers a read-only ratio counter under `id`.
    ///
    /// Its value is `value(numerator) / value(denominator)`, or `0.0` when
    /// the denominator is zero.
    pub fn add_ratio_counter(
        &mut self,
        id: CounterId,
        name: impl Into<String>,
        numerator: CounterId,
        denominator: CounterId,
    ) {
        self.insert(
            id,
            Counter {
                name: name.into(),
                value: 0.0,
                kind: CounterKind::Ratio {
                    numerator,
                    denominator,
                },
            },
        );
    }

    fn insert(&mut self, id: CounterId, counter: Counter) {
        if let Some(existing) = self.counters.get(&id) {
            warn!(
                manager = %self.label,
                id,
                existing = %existing.name,
                "duplicate counter registration ignored"
            );
            return;
        }
        self.counters.insert(id, counter);
    }

    /// Adds `delta` to the stored counter `id`.
    ///
    /// Pegging a ratio counter is a silent no-op; pegging an unknown id
    /// logs a warning and does nothing.
    pub fn peg(&mut self, id: CounterId, delta: f64) {
        match self.counters.get_mut(&id) {
            Some(counter) => {
                if let CounterKind::Stored = counter.kind {
                    counter.value += delta;
                }
            }
            None => warn!(manager = %self.label, id, "peg on unknown counter id"),
        }
    }

    /// Returns the current value of counter `id`.
    ///
    /// Ratio counters are computed on demand with a division-by-zero guard.
    /// An unknown id logs a warning and yields `0.0`.
    pub fn value(&self, id: CounterId) -> f64 {
        match self.counters.get(&id) {
            Some(counter) => self.eval(counter),
            None => {
                warn!(manager = %self.label, id, "lookup of unknown counter id");
                0.0
            }
        }
    }

    /// Returns the `(name, value)` pair for counter `id`.
    ///
    /// An unknown id logs a warning and yields `("error", 0.0)`.
    pub fn get(&self, id: CounterId) -> (String, f64) {
        match self.counters.get(&id) {
            Some(counter) => (counter.name.clone(), self.eval(counter)),
            None => {
                warn!(manager = %self.label, id, "lookup of unknown counter id");
                ("error".to_string(), 0.0)
            }
        }
    }

    fn eval(&self, counter: &Counter) -> f64 {
        match counter.kind {
            CounterKind::Stored => counter.value,
            CounterKind::Ratio {
                numerator,
                denominator,
            } => {
                let den = self.stored_value(denominator);
                if den == 0.0 {
                    0.0
                } else {
                    self.stored_value(numerator) / den
                }
            }
        }
    }

    /// Raw stored value without warnings; unknown or ratio operands read
    /// as zero so a misconfigured ratio degrades to `0.0`.
    fn stored_value(&self, id: CounterId) -> f64 {
        match self.counters.get(&id) {
            Some(Counter {
                value,
                kind: CounterKind::Stored,
                ..
            }) => *value,
            _ => 0.0,
        }
    }

    /// Zeroes the stored counter `id`.
    ///
    /// Resetting a ratio counter is a silent no-op; an unknown id logs a
    /// warning.
    pub fn reset_counter(&mut self, id: CounterId) {
        match self.counters.get_mut(&id) {
            Some(counter) => {
                if let CounterKind::Stored = counter.kind {
                    counter.value = 0.0;
                }
            }
            None => warn!(manager = %self.label, id, "reset of unknown counter id"),
        }
    }

    /// Zeroes every stored counter.
    pub fn reset_all_counters(&mut self) {
        for counter in self.counters.values_mut() {
            if let CounterKind::Stored = counter.kind {
                counter.value = 0.0;
            }
        }
    }

    /// Returns the manager label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Produces a serializable snapshot of every counter, ratio counters
    /// evaluated at snapshot time.
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            label: self.label.clone(),
            counters: self
                .counters
                .iter()
                .map(|(&id, counter)| CounterSnapshot {
                    id,
                    name: counter.name.clone(),
                    value: self.eval(counter),
                })
                .collect(),
        }
    }
}

impl fmt::Display for CounterManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        for (id, counter) in &self.counters {
            writeln!(
                f,
                "  [{:>3}] {:<28} {:.9}",
                id,
                counter.name,
                self.eval(counter)
            )?;
        }
        Ok(())
    }
}

/// Serializable snapshot of one counter manager.
#[derive(Debug, Clone, Serialize)]
pub struct CountersSnapshot {
    pub label: String,
    pub counters: Vec<CounterSnapshot>,
}

/// Serializable snapshot of one counter slot.
#[derive(Debug, Clone, Serialize)]
pub struct CounterSnapshot {
    pub id: CounterId,
    pub name: String,
    pub value: f64,
}
