//! # hedging-engine
//!
//! Scenario engine for hedging a commodity priced in two currencies.
//!
//! Three market levers — the premium over the board price, the board
//! (base) price itself, and the exchange rate — each carry a current value
//! and an optional directional scenario. The engine projects the levers
//! through their scenarios, derives a price pair in both currencies, and
//! evaluates hedging strategies that lock some levers against scenario
//! movement while leaving the rest exposed.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: levers, scenarios, strategies, prices
//! - **engine** — Lever state, price derivation, strategy evaluation, history
//! - **snapshot** — Configuration snapshot capture and JSON file I/O
//! - **simulation** — Magnitude sweeps and randomized stress runs

pub mod core;
pub mod engine;
pub mod simulation;
pub mod snapshot;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::lever::{Direction, Lever, LeverId};
    pub use crate::core::price::PricePair;
    pub use crate::core::strategy::{RiskExposure, Strategy};
    pub use crate::engine::result::SimulationResult;
    pub use crate::engine::{EngineError, ScenarioEngine};
    pub use crate::snapshot::Snapshot;
}
