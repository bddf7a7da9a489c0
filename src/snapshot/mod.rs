//! Configuration snapshots: capture lever state, apply it back, and move
//! it through JSON files.
//!
//! A snapshot records, per lever, the current value and the scenario
//! (direction and magnitude). Simulation history is never part of a
//! snapshot. File writes go through a sibling temp file and a rename so
//! a failed save cannot leave a half-written document behind.

use crate::core::lever::{Direction, LeverId, UnknownLever};
use crate::engine::{EngineError, ScenarioEngine};
use chrono::{DateTime, Utc};
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors arising from snapshot I/O and application.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownLever(#[from] UnknownLever),
    #[error(transparent)]
    Value(#[from] EngineError),
}

/// Per-lever slice of a snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverSnapshot {
    pub current_value: Decimal,
    pub scenario: Direction,
    pub magnitude: Decimal,
}

/// A flat configuration snapshot of the engine's levers.
///
/// # Examples
///
/// ```
/// use hedging_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut engine = ScenarioEngine::new();
/// engine.set_value(LeverId::Premium, dec!(1.20)).unwrap();
///
/// let snapshot = Snapshot::capture(&engine);
/// let mut restored = ScenarioEngine::new();
/// snapshot.apply(&mut restored).unwrap();
/// assert_eq!(restored.lever(LeverId::Premium).current_value(), dec!(1.20));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Lever state keyed by lever identifier (`premium`, `base_price`,
    /// `exchange_rate`).
    pub levers: BTreeMap<String, LeverSnapshot>,
    /// Capture timestamp. Audit metadata only; ignored on apply.
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Capture the current lever state of an engine.
    pub fn capture(engine: &ScenarioEngine) -> Self {
        let levers = engine
            .levers()
            .map(|lever| {
                (
                    lever.id().as_str().to_string(),
                    LeverSnapshot {
                        current_value: lever.current_value(),
                        scenario: lever.direction(),
                        magnitude: lever.magnitude(),
                    },
                )
            })
            .collect();
        Self {
            levers,
            saved_at: Some(Utc::now()),
        }
    }

    /// When this snapshot was captured, if recorded.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    /// Apply this snapshot to an engine: for each documented lever, set
    /// the value, then the scenario.
    ///
    /// Fails on an unknown lever key or an out-of-range value. Levers
    /// processed before the failure keep their applied state; there is no
    /// rollback.
    pub fn apply(&self, engine: &mut ScenarioEngine) -> Result<(), SnapshotError> {
        for (key, entry) in &self.levers {
            let id: LeverId = key.parse()?;
            engine.set_value(id, entry.current_value)?;
            engine.set_scenario(id, entry.scenario, entry.magnitude);
        }
        Ok(())
    }

    /// Serialize to a pretty JSON document.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write this snapshot to `path`, all-or-nothing.
    ///
    /// The document lands in a sibling `.tmp` file first and is renamed
    /// into place, so the destination is never left half-written.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        info!("snapshot saved to {}", path.display());
        Ok(())
    }

    /// Read a snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl ScenarioEngine {
    /// Capture the lever state and write it to `path` as JSON.
    pub fn export_snapshot(&self, path: &Path) -> Result<(), SnapshotError> {
        Snapshot::capture(self).save(path)
    }

    /// Load a snapshot from `path` and apply it to this engine.
    pub fn import_snapshot(&mut self, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::load(path)?;
        snapshot.apply(self)?;
        info!("snapshot imported from {}", path.display());
        Ok(())
    }
}
