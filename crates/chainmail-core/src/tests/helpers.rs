//! Test helper functions for building units and engines.

use proptest::prelude::*;

use crate::dice::ScriptedDice;
use crate::engine::Engine;
use crate::tables::CombatTables;
use crate::unit::{Unit, UnitType};

// =============================================================================
// Factories
// =============================================================================

/// Builds a unit, panicking on a zero count.
pub fn unit(unit_type: UnitType, count: u32) -> Unit {
    Unit::new(unit_type, count).expect("test units have at least one troop")
}

/// Engine with standard tables that replays `faces`.
pub fn scripted_engine(faces: impl IntoIterator<Item = u8>) -> Engine<ScriptedDice> {
    let dice = ScriptedDice::new(faces).expect("test faces are 1-6");
    Engine::with_dice(CombatTables::standard(), dice).expect("standard tables are valid")
}

/// Every ordered pair of unit types.
pub fn all_matchups() -> impl Iterator<Item = (UnitType, UnitType)> {
    UnitType::all()
        .iter()
        .flat_map(|a| UnitType::all().iter().map(move |d| (*a, *d)))
}

// =============================================================================
// Strategies
// =============================================================================

/// Any unit type.
pub fn unit_type_strategy() -> impl Strategy<Value = UnitType> {
    prop::sample::select(UnitType::all().to_vec())
}

/// A unit of 1-60 troops.
pub fn unit_strategy() -> impl Strategy<Value = Unit> {
    (unit_type_strategy(), 1..=60u32).prop_map(|(t, count)| unit(t, count))
}

/// A die face.
pub fn die_strategy() -> impl Strategy<Value = u8> {
    1..=6u8
}
