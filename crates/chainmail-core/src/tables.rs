//! Combat tables.
//!
//! Three lookups drive the rules, all keyed by [`UnitType::index`]:
//!
//! - **Attack factor** (acting type, opposing type): dice rolled per trooper
//! - **Kill threshold** (acting type, opposing type): minimum face that kills
//! - **Morale rating** (unit type): weight of each survivor in the morale check
//!
//! [`CombatTables::default`] is the standard rule set. Tables are
//! deserializable so house rules can be loaded from a file; run
//! [`CombatTables::validate`] on anything that did not come from `default`.
//!
//! # Example
//!
//! ```
//! use chainmail_core::tables::{AttackFactor, CombatTables};
//! use chainmail_core::unit::UnitType;
//!
//! let tables = CombatTables::default();
//! assert_eq!(
//!     tables.attack_factor(UnitType::HeavyHorse, UnitType::LightFoot),
//!     AttackFactor::whole(4),
//! );
//! assert_eq!(tables.kill_threshold(UnitType::ArmoredFoot, UnitType::LightFoot), 4);
//! assert_eq!(tables.kill_threshold(UnitType::LightFoot, UnitType::ArmoredFoot), 6);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dice::DIE_FACES;
use crate::error::{Error, Result};
use crate::unit::UnitType;

const N: usize = UnitType::COUNT;

/// Dice rolled per trooper, as an exact ratio.
///
/// Fractional factors model units where not every trooper gets a die. The
/// number of dice for a unit is `floor(count * numerator / denominator)`,
/// computed in integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackFactor {
    /// Numerator of the ratio.
    pub numerator: u32,
    /// Denominator of the ratio. Never zero in validated tables.
    pub denominator: u32,
}

impl AttackFactor {
    /// A factor of `numerator / denominator`.
    #[must_use]
    pub const fn ratio(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// A whole-number factor.
    #[must_use]
    pub const fn whole(n: u32) -> Self {
        Self::ratio(n, 1)
    }

    /// The factor as a floating-point value, for display.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Dice rolled by `count` troopers: `floor(factor * count)`.
    #[must_use]
    pub fn dice_for(self, count: u32) -> u64 {
        u64::from(count) * u64::from(self.numerator) / u64::from(self.denominator)
    }
}

impl fmt::Display for AttackFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

const ONE: AttackFactor = AttackFactor::whole(1);
const TWO: AttackFactor = AttackFactor::whole(2);
const THREE: AttackFactor = AttackFactor::whole(3);
const FOUR: AttackFactor = AttackFactor::whole(4);
const HALF: AttackFactor = AttackFactor::ratio(1, 2);
const THIRD: AttackFactor = AttackFactor::ratio(1, 3);
const QUARTER: AttackFactor = AttackFactor::ratio(1, 4);

/// Standard attack factors. Rows: acting type. Columns: opposing type.
const STANDARD_ATTACK_FACTORS: [[AttackFactor; N]; N] = [
    // LF     HF    AF     LH    MH     HH
    [ONE, HALF, THIRD, HALF, THIRD, QUARTER], // LIGHT_FOOT
    [ONE, ONE, HALF, HALF, THIRD, QUARTER],   // HEAVY_FOOT
    [ONE, ONE, ONE, ONE, HALF, THIRD],        // ARMORED_FOOT
    [TWO, TWO, ONE, ONE, HALF, THIRD],        // LIGHT_HORSE
    [TWO, TWO, TWO, ONE, ONE, HALF],          // MEDIUM_HORSE
    [FOUR, THREE, TWO, TWO, ONE, ONE],        // HEAVY_HORSE
];

/// Standard kill thresholds. Rows: acting type. Columns: opposing type.
const STANDARD_KILL_THRESHOLDS: [[u8; N]; N] = [
    // LF HF AF LH MH HH
    [6, 6, 6, 6, 6, 6], // LIGHT_FOOT
    [5, 6, 6, 6, 6, 6], // HEAVY_FOOT
    [4, 5, 6, 6, 6, 6], // ARMORED_FOOT
    [5, 6, 6, 6, 6, 6], // LIGHT_HORSE
    [5, 5, 6, 5, 6, 6], // MEDIUM_HORSE
    [5, 5, 5, 5, 5, 6], // HEAVY_HORSE
];

const fn standard_morale_ratings() -> [u32; N] {
    let all = UnitType::all();
    let mut ratings = [0; N];
    let mut i = 0;
    while i < N {
        ratings[all[i].index()] = all[i].morale_rating();
        i += 1;
    }
    ratings
}

/// Lookup tables for melee and morale resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatTables {
    /// Dice per trooper, indexed `[acting][opposing]`.
    pub attack_factors: [[AttackFactor; N]; N],
    /// Minimum face that kills, indexed `[acting][opposing]`.
    pub kill_thresholds: [[u8; N]; N],
    /// Morale weight per surviving trooper, indexed by unit type.
    pub morale_ratings: [u32; N],
}

impl Default for CombatTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl CombatTables {
    /// The standard rule set.
    pub const STANDARD: Self = Self {
        attack_factors: STANDARD_ATTACK_FACTORS,
        kill_thresholds: STANDARD_KILL_THRESHOLDS,
        morale_ratings: standard_morale_ratings(),
    };

    /// The standard rule set.
    #[must_use]
    pub fn standard() -> Self {
        Self::STANDARD
    }

    /// Attack factor of `acting` against `opposing`.
    #[must_use]
    pub fn attack_factor(&self, acting: UnitType, opposing: UnitType) -> AttackFactor {
        self.attack_factors[acting.index()][opposing.index()]
    }

    /// Minimum face `acting` needs to kill a trooper of `opposing`.
    #[must_use]
    pub fn kill_threshold(&self, acting: UnitType, opposing: UnitType) -> u8 {
        self.kill_thresholds[acting.index()][opposing.index()]
    }

    /// Morale weight of one surviving trooper of `unit_type`.
    #[must_use]
    pub fn morale_rating(&self, unit_type: UnitType) -> u32 {
        self.morale_ratings[unit_type.index()]
    }

    /// Checks every entry is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTables`] naming the first bad entry: an attack
    /// factor with a zero denominator, a kill threshold outside `1..=6`, or a
    /// zero morale rating.
    pub fn validate(&self) -> Result<()> {
        for acting in UnitType::all() {
            for opposing in UnitType::all() {
                let factor = self.attack_factor(*acting, *opposing);
                if factor.denominator == 0 {
                    return Err(Error::InvalidTables(format!(
                        "attack factor {acting} vs {opposing} has a zero denominator"
                    )));
                }
                let threshold = self.kill_threshold(*acting, *opposing);
                if !(1..=DIE_FACES).contains(&threshold) {
                    return Err(Error::InvalidTables(format!(
                        "kill threshold {acting} vs {opposing} is {threshold}, expected 1-6"
                    )));
                }
            }
            if self.morale_rating(*acting) == 0 {
                return Err(Error::InvalidTables(format!(
                    "morale rating for {acting} is zero"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitType::{
        ArmoredFoot, HeavyFoot, HeavyHorse, LightFoot, LightHorse, MediumHorse,
    };

    mod attack_factor_tests {
        use super::*;

        #[test]
        fn whole_factor_multiplies() {
            assert_eq!(AttackFactor::whole(4).dice_for(10), 40);
            assert_eq!(AttackFactor::whole(1).dice_for(7), 7);
        }

        #[test]
        fn fractional_factor_floors() {
            assert_eq!(AttackFactor::ratio(1, 2).dice_for(7), 3);
            assert_eq!(AttackFactor::ratio(1, 3).dice_for(8), 2);
            assert_eq!(AttackFactor::ratio(1, 4).dice_for(3), 0);
        }

        #[test]
        fn thirds_are_exact() {
            for count in (3..=300).step_by(3) {
                assert_eq!(AttackFactor::ratio(1, 3).dice_for(count), u64::from(count / 3));
            }
        }

        #[test]
        fn zero_count_rolls_nothing() {
            assert_eq!(AttackFactor::whole(4).dice_for(0), 0);
        }

        #[test]
        fn display() {
            assert_eq!(AttackFactor::whole(3).to_string(), "3");
            assert_eq!(AttackFactor::ratio(1, 3).to_string(), "1/3");
        }

        #[test]
        fn as_f64() {
            assert!((AttackFactor::ratio(1, 4).as_f64() - 0.25).abs() < f64::EPSILON);
        }
    }

    mod standard_table_tests {
        use super::*;

        #[test]
        fn standard_tables_are_valid() {
            assert_eq!(CombatTables::standard().validate(), Ok(()));
        }

        #[test]
        fn factors_span_quarter_to_four() {
            let tables = CombatTables::standard();
            for acting in UnitType::all() {
                for opposing in UnitType::all() {
                    let value = tables.attack_factor(*acting, *opposing).as_f64();
                    assert!((0.25..=4.0).contains(&value), "{acting} vs {opposing}: {value}");
                }
            }
        }

        // One spot check per row, using 12 troopers so every ratio divides evenly.
        #[test]
        fn attack_factor_rows() {
            let tables = CombatTables::standard();
            let cases = [
                (LightFoot, HeavyHorse, 3),
                (LightFoot, ArmoredFoot, 4),
                (HeavyFoot, LightFoot, 12),
                (HeavyFoot, LightHorse, 6),
                (ArmoredFoot, LightHorse, 12),
                (ArmoredFoot, HeavyHorse, 4),
                (LightHorse, HeavyFoot, 24),
                (LightHorse, MediumHorse, 6),
                (MediumHorse, ArmoredFoot, 24),
                (MediumHorse, HeavyHorse, 6),
                (HeavyHorse, LightFoot, 48),
                (HeavyHorse, HeavyFoot, 36),
                (HeavyHorse, HeavyHorse, 12),
            ];
            for (acting, opposing, dice) in cases {
                assert_eq!(
                    tables.attack_factor(acting, opposing).dice_for(12),
                    dice,
                    "{acting} vs {opposing}"
                );
            }
        }

        #[test]
        fn attack_factors_are_asymmetric() {
            let tables = CombatTables::standard();
            assert_eq!(tables.attack_factor(HeavyHorse, LightFoot), AttackFactor::whole(4));
            assert_eq!(tables.attack_factor(LightFoot, HeavyHorse), AttackFactor::ratio(1, 4));
        }

        #[test]
        fn kill_thresholds_are_asymmetric() {
            let tables = CombatTables::standard();
            assert_eq!(tables.kill_threshold(ArmoredFoot, LightFoot), 4);
            assert_eq!(tables.kill_threshold(LightFoot, ArmoredFoot), 6);
        }

        #[test]
        fn light_foot_always_needs_six() {
            let tables = CombatTables::standard();
            for opposing in UnitType::all() {
                assert_eq!(tables.kill_threshold(LightFoot, *opposing), 6);
            }
        }

        #[test]
        fn heavy_horse_needs_five_except_against_heavy_horse() {
            let tables = CombatTables::standard();
            for opposing in UnitType::all() {
                let expected = if *opposing == HeavyHorse { 6 } else { 5 };
                assert_eq!(tables.kill_threshold(HeavyHorse, *opposing), expected);
            }
        }

        #[test]
        fn medium_horse_thresholds() {
            let tables = CombatTables::standard();
            assert_eq!(tables.kill_threshold(MediumHorse, LightFoot), 5);
            assert_eq!(tables.kill_threshold(MediumHorse, HeavyFoot), 5);
            assert_eq!(tables.kill_threshold(MediumHorse, ArmoredFoot), 6);
            assert_eq!(tables.kill_threshold(MediumHorse, LightHorse), 5);
            assert_eq!(tables.kill_threshold(MediumHorse, MediumHorse), 6);
        }

        #[test]
        fn morale_ratings_follow_unit_types() {
            let tables = CombatTables::standard();
            for unit_type in UnitType::all() {
                assert_eq!(tables.morale_rating(*unit_type), unit_type.morale_rating());
            }
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn rejects_zero_denominator() {
            let mut tables = CombatTables::standard();
            tables.attack_factors[1][2] = AttackFactor::ratio(1, 0);
            assert!(matches!(tables.validate(), Err(Error::InvalidTables(msg)) if msg.contains("HEAVY_FOOT vs ARMORED_FOOT")));
        }

        #[test]
        fn rejects_threshold_above_six() {
            let mut tables = CombatTables::standard();
            tables.kill_thresholds[0][0] = 7;
            assert!(matches!(tables.validate(), Err(Error::InvalidTables(_))));
        }

        #[test]
        fn rejects_threshold_zero() {
            let mut tables = CombatTables::standard();
            tables.kill_thresholds[5][5] = 0;
            assert!(matches!(tables.validate(), Err(Error::InvalidTables(_))));
        }

        #[test]
        fn rejects_zero_morale_rating() {
            let mut tables = CombatTables::standard();
            tables.morale_ratings[3] = 0;
            assert!(matches!(tables.validate(), Err(Error::InvalidTables(msg)) if msg.contains("LIGHT_HORSE")));
        }

        #[test]
        fn serde_roundtrip() {
            let tables = CombatTables::standard();
            let json = serde_json::to_string(&tables).unwrap();
            let deserialized: CombatTables = serde_json::from_str(&json).unwrap();
            assert_eq!(tables, deserialized);
        }
    }
}
