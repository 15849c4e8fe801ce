//! # Chainmail Core
//!
//! Melee resolution engine for medieval miniatures combat.
//!
//! One round of melee is two rule evaluations:
//!
//! - **Melee damage**: each side rolls d6s in proportion to its troops and
//!   kills on a threshold set by the matchup
//! - **Post-melee morale**: survivors are scored and the losing side falls
//!   back, retreats, routs or surrenders
//!
//! ## Architecture
//!
//! - [`unit`]: unit types and unit stacks
//! - [`dice`]: the injectable [`DiceSource`] and its implementations
//! - [`tables`]: attack factors, kill thresholds, morale ratings
//! - [`resolver`]: the melee and morale resolvers
//! - [`engine`]: runs a whole round with owned tables and dice
//!
//! ## Usage
//!
//! ```rust
//! use chainmail_core::{Engine, Unit, UnitType};
//!
//! let attacker = Unit::new(UnitType::HeavyHorse, 12)?;
//! let defender = Unit::new(UnitType::HeavyFoot, 30)?;
//!
//! let mut engine = Engine::new(2024);
//! let report = engine.resolve_round(&attacker, &defender)?;
//! println!("{}", report.morale.outcome());
//! # Ok::<(), chainmail_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dice;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod tables;
pub mod unit;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use dice::{DiceSource, ScriptedDice, SeededDice};
pub use engine::{Engine, RoundReport};
pub use error::{Error, Result};
pub use resolver::{
    MeleeDamageResult, MeleeResolver, MoraleBand, MoraleResolver, Outcome, PostMeleeMoraleResult,
    Side,
};
pub use tables::{AttackFactor, CombatTables};
pub use unit::{Unit, UnitType};
