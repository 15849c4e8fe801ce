//! Unit types and unit stacks.
//!
//! - [`UnitType`]: the six troop classes, ordered by increasing combat power
//! - [`Unit`]: an immutable (type, count) pair describing one side of a melee
//!
//! # Example
//!
//! ```
//! use chainmail_core::unit::{Unit, UnitType};
//!
//! let knights = Unit::new(UnitType::HeavyHorse, 12).unwrap();
//! let survivors = knights.after_losses(5).unwrap();
//!
//! assert_eq!(survivors.count(), 7);
//! assert_eq!(survivors.unit_type(), UnitType::HeavyHorse);
//! assert_eq!("heavy_horse".parse::<UnitType>().unwrap(), UnitType::HeavyHorse);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Troop class of a unit.
///
/// Variants are declared in order of increasing combat power; the
/// discriminant doubles as the row/column index into the combat tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum UnitType {
    /// Lightly equipped infantry.
    LightFoot = 0,
    /// Line infantry.
    HeavyFoot = 1,
    /// Infantry in full armor.
    ArmoredFoot = 2,
    /// Skirmishing cavalry.
    LightHorse = 3,
    /// Medium cavalry.
    MediumHorse = 4,
    /// Mounted knights.
    HeavyHorse = 5,
}

impl UnitType {
    /// Total number of unit types.
    pub const COUNT: usize = 6;

    /// All unit types in order of increasing combat power.
    #[must_use]
    pub const fn all() -> &'static [UnitType; Self::COUNT] {
        &[
            UnitType::LightFoot,
            UnitType::HeavyFoot,
            UnitType::ArmoredFoot,
            UnitType::LightHorse,
            UnitType::MediumHorse,
            UnitType::HeavyHorse,
        ]
    }

    /// Table index of this type.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical upper-case name, as printed on the rules tables.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LightFoot => "LIGHT_FOOT",
            Self::HeavyFoot => "HEAVY_FOOT",
            Self::ArmoredFoot => "ARMORED_FOOT",
            Self::LightHorse => "LIGHT_HORSE",
            Self::MediumHorse => "MEDIUM_HORSE",
            Self::HeavyHorse => "HEAVY_HORSE",
        }
    }

    /// Standard morale rating factor used to weight surviving troops.
    #[must_use]
    pub const fn morale_rating(self) -> u32 {
        match self {
            Self::LightFoot => 4,
            Self::HeavyFoot => 5,
            Self::ArmoredFoot => 7,
            Self::LightHorse => 6,
            Self::MediumHorse => 8,
            Self::HeavyHorse => 9,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitType {
    type Err = Error;

    /// Parses a unit type by exact, case-insensitive match on its name.
    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownUnitType(s.to_owned()))
    }
}

/// One side's troops in a melee.
///
/// A `Unit` has no identity beyond its values and is never mutated; applying
/// casualties produces a new `Unit`. Units built with [`Unit::new`] always
/// have at least one troop, while [`Unit::after_losses`] may leave zero
/// survivors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "type")]
    unit_type: UnitType,
    count: u32,
}

impl Unit {
    /// Creates a unit of `count` troops.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCount`] if `count` is zero.
    pub fn new(unit_type: UnitType, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(Error::ZeroCount { unit_type });
        }
        Ok(Self { unit_type, count })
    }

    /// Troop class.
    #[must_use]
    pub const fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    /// Number of troops.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Returns the unit left after `losses` troops are removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LossesExceedCount`] if `losses` is larger than the
    /// current count.
    pub fn after_losses(&self, losses: u32) -> Result<Self> {
        let count = self
            .count
            .checked_sub(losses)
            .ok_or(Error::LossesExceedCount {
                unit_type: self.unit_type,
                count: self.count,
                losses,
            })?;
        Ok(Self {
            unit_type: self.unit_type,
            count,
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.unit_type, self.count)
    }
}
