//! Rule evaluators for one round of melee.
//!
//! A round is resolved in two steps:
//! 1. [`MeleeResolver`] rolls both sides' dice and counts casualties
//! 2. [`MoraleResolver`] scores the post-casualty units and classifies the
//!    result into one of eleven [`Outcome`]s
//!
//! The caller sits between the two steps, removing casualties from each unit
//! (see [`Unit::after_losses`](crate::unit::Unit::after_losses)).
//! [`Engine::resolve_round`](crate::engine::Engine::resolve_round) runs the
//! whole sequence.
//!
//! # Invariants
//!
//! - Resolvers hold no mutable state; all randomness flows through the
//!   injected [`DiceSource`](crate::dice::DiceSource)
//! - Given the same units and the same dice, a resolver produces the same
//!   result
//! - Kills never exceed the opposing side's troops

mod melee;
mod morale;

pub use melee::{MeleeDamageResult, MeleeResolver};
pub use morale::{MoraleBand, MoraleResolver, Outcome, PostMeleeMoraleResult, Side};

use crate::tables::CombatTables;

static STANDARD_TABLES: CombatTables = CombatTables::STANDARD;

/// The standard tables, borrowed for the life of the program.
pub(crate) fn standard_tables() -> &'static CombatTables {
    &STANDARD_TABLES
}
