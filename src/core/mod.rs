//! Foundational types for the scenario engine.

pub mod lever;
pub mod price;
pub mod strategy;
