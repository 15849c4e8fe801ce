//! Error type for the resolution engine.
//!
//! The resolvers themselves never fail on well-formed units. Errors arise only
//! at the edges: building a [`Unit`](crate::unit::Unit), applying casualties,
//! parsing a unit type name, scripting dice, or loading custom
//! [`CombatTables`](crate::tables::CombatTables).

use thiserror::Error;

use crate::unit::UnitType;

/// Errors produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A unit was constructed with no troops.
    #[error("unit of {unit_type} must have at least one troop")]
    ZeroCount {
        /// Type of the rejected unit.
        unit_type: UnitType,
    },

    /// More casualties were applied to a unit than it has troops.
    #[error("{unit_type} unit of {count} cannot lose {losses} troops")]
    LossesExceedCount {
        /// Type of the unit.
        unit_type: UnitType,
        /// Troops in the unit before casualties.
        count: u32,
        /// Casualties that were applied.
        losses: u32,
    },

    /// A scripted die face is outside 1..=6.
    #[error("die face {0} is not between 1 and 6")]
    InvalidDieFace(u8),

    /// Text did not name one of the six unit types.
    #[error("unknown unit type: {0}")]
    UnknownUnitType(String),

    /// A combat table entry is out of range.
    #[error("invalid combat tables: {0}")]
    InvalidTables(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
