//! Engine: runs a full round of melee.
//!
//! The `Engine` owns the combat tables and a dice source and drives the
//! round in order:
//!
//! 1. **MELEE**: both sides roll, casualties are counted
//! 2. **CASUALTIES**: each unit loses the troops the other side killed
//! 3. **MORALE**: survivors are scored and the outcome classified
//!
//! # Determinism
//!
//! With [`SeededDice`], the same seed and the same units always produce the
//! same [`RoundReport`].
//!
//! # Example
//!
//! ```
//! use chainmail_core::engine::Engine;
//! use chainmail_core::unit::{Unit, UnitType};
//!
//! let mut engine = Engine::new(42);
//! let attacker = Unit::new(UnitType::HeavyHorse, 10).unwrap();
//! let defender = Unit::new(UnitType::HeavyFoot, 20).unwrap();
//!
//! let report = engine.resolve_round(&attacker, &defender).unwrap();
//!
//! assert_eq!(report.attacker_after.count(), 10 - report.melee.defender_kills());
//! assert_eq!(report.defender_after.count(), 20 - report.melee.attacker_kills());
//! ```

use serde::{Deserialize, Serialize};

use crate::dice::{DiceSource, SeededDice};
use crate::error::Result;
use crate::resolver::{MeleeDamageResult, MeleeResolver, MoraleResolver, PostMeleeMoraleResult};
use crate::tables::CombatTables;
use crate::unit::Unit;

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Attacking unit at the start of the round.
    pub attacker: Unit,
    /// Defending unit at the start of the round.
    pub defender: Unit,
    /// Dice and casualties.
    pub melee: MeleeDamageResult,
    /// Attacking unit after casualties.
    pub attacker_after: Unit,
    /// Defending unit after casualties.
    pub defender_after: Unit,
    /// Morale scores and outcome.
    pub morale: PostMeleeMoraleResult,
}

/// Melee resolution engine.
#[derive(Debug, Clone)]
pub struct Engine<D = SeededDice> {
    tables: CombatTables,
    dice: D,
}

impl Engine<SeededDice> {
    /// Creates an engine with the standard tables and seeded dice.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            tables: CombatTables::standard(),
            dice: SeededDice::new(seed),
        }
    }

    /// Creates an engine with the standard tables and a random seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(SeededDice::from_entropy().seed())
    }

    /// Seed of the engine's dice.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.dice.seed()
    }
}

impl<D: DiceSource> Engine<D> {
    /// Creates an engine from custom tables and any dice source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTables`](crate::error::Error::InvalidTables)
    /// if `tables` fails validation.
    pub fn with_dice(tables: CombatTables, dice: D) -> Result<Self> {
        tables.validate()?;
        Ok(Self { tables, dice })
    }

    /// The engine's combat tables.
    #[must_use]
    pub fn tables(&self) -> &CombatTables {
        &self.tables
    }

    /// The engine's dice.
    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Consumes the engine, returning its dice.
    pub fn into_dice(self) -> D {
        self.dice
    }

    /// Rolls the melee between `attacker` and `defender`.
    pub fn resolve_melee_damage(&mut self, attacker: &Unit, defender: &Unit) -> MeleeDamageResult {
        MeleeResolver::new(&self.tables).resolve(attacker, defender, &mut self.dice)
    }

    /// Rolls the morale check for post-casualty `attacker` and `defender`.
    pub fn resolve_post_melee_morale(
        &mut self,
        attacker: &Unit,
        defender: &Unit,
        melee: &MeleeDamageResult,
    ) -> PostMeleeMoraleResult {
        MoraleResolver::new(&self.tables).resolve(attacker, defender, melee, &mut self.dice)
    }

    /// Runs melee, applies casualties and resolves morale.
    ///
    /// # Errors
    ///
    /// Kills are capped at each side's troops, so casualties always fit.
    /// The error from [`Unit::after_losses`] is still propagated rather than
    /// assumed away.
    pub fn resolve_round(&mut self, attacker: &Unit, defender: &Unit) -> Result<RoundReport> {
        let melee = self.resolve_melee_damage(attacker, defender);
        let attacker_after = attacker.after_losses(melee.attacker_losses())?;
        let defender_after = defender.after_losses(melee.defender_losses())?;
        let morale = self.resolve_post_melee_morale(&attacker_after, &defender_after, &melee);

        tracing::info!(
            attacker = %attacker,
            defender = %defender,
            attacker_kills = melee.attacker_kills(),
            defender_kills = melee.defender_kills(),
            outcome = %morale.outcome(),
            "round resolved"
        );

        Ok(RoundReport {
            attacker: *attacker,
            defender: *defender,
            melee,
            attacker_after,
            defender_after,
            morale,
        })
    }
}
