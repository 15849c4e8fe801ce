//! Melee damage resolution.
//!
//! Both sides strike simultaneously. For each side:
//! 1. Dice = floor(attack factor × troops), factor keyed by (acting, opposing)
//! 2. Roll that many dice
//! 3. Every die at or above the kill threshold for (acting, opposing) kills
//! 4. Kills are capped at the opposing side's troops

use serde::{Deserialize, Serialize};

use crate::dice::DiceSource;
use crate::tables::CombatTables;
use crate::unit::Unit;

use super::standard_tables;

/// Dice and casualties from one round of melee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeDamageResult {
    attacker_dice: Vec<u8>,
    defender_dice: Vec<u8>,
    attacker_kills: u32,
    defender_kills: u32,
}

impl MeleeDamageResult {
    /// Creates a result from recorded dice and kill counts.
    #[must_use]
    pub fn new(
        attacker_dice: Vec<u8>,
        defender_dice: Vec<u8>,
        attacker_kills: u32,
        defender_kills: u32,
    ) -> Self {
        Self {
            attacker_dice,
            defender_dice,
            attacker_kills,
            defender_kills,
        }
    }

    /// Dice rolled by the attacker, in roll order.
    #[must_use]
    pub fn attacker_dice(&self) -> &[u8] {
        &self.attacker_dice
    }

    /// Dice rolled by the defender, in roll order.
    #[must_use]
    pub fn defender_dice(&self) -> &[u8] {
        &self.defender_dice
    }

    /// Defenders killed by the attacker.
    #[must_use]
    pub fn attacker_kills(&self) -> u32 {
        self.attacker_kills
    }

    /// Attackers killed by the defender.
    #[must_use]
    pub fn defender_kills(&self) -> u32 {
        self.defender_kills
    }

    /// Troops the attacker lost.
    #[must_use]
    pub fn attacker_losses(&self) -> u32 {
        self.defender_kills
    }

    /// Troops the defender lost.
    #[must_use]
    pub fn defender_losses(&self) -> u32 {
        self.attacker_kills
    }
}

/// Resolves the casualty step of a melee.
///
/// # Example
///
/// ```
/// use chainmail_core::dice::ScriptedDice;
/// use chainmail_core::resolver::MeleeResolver;
/// use chainmail_core::unit::{Unit, UnitType};
///
/// let attacker = Unit::new(UnitType::ArmoredFoot, 3).unwrap();
/// let defender = Unit::new(UnitType::LightFoot, 3).unwrap();
///
/// // Armored foot roll 3 dice and kill light foot on 4+.
/// // Light foot get one die per three troopers and kill armored foot only on 6.
/// let mut dice = ScriptedDice::new([4, 5, 1, 6]).unwrap();
/// let result = MeleeResolver::standard().resolve(&attacker, &defender, &mut dice);
///
/// assert_eq!(result.attacker_kills(), 2);
/// assert_eq!(result.defender_kills(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MeleeResolver<'t> {
    tables: &'t CombatTables,
}

impl MeleeResolver<'static> {
    /// A resolver using the standard tables.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_tables())
    }
}

impl Default for MeleeResolver<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'t> MeleeResolver<'t> {
    /// A resolver using `tables`.
    #[must_use]
    pub fn new(tables: &'t CombatTables) -> Self {
        Self { tables }
    }

    /// Number of dice `acting` rolls against `opposing`.
    #[must_use]
    pub fn dice_to_roll(&self, acting: &Unit, opposing: &Unit) -> usize {
        let factor = self
            .tables
            .attack_factor(acting.unit_type(), opposing.unit_type());
        usize::try_from(factor.dice_for(acting.count())).unwrap_or(usize::MAX)
    }

    /// Minimum face `acting` needs to kill one of `opposing`.
    #[must_use]
    pub fn kill_threshold(&self, acting: &Unit, opposing: &Unit) -> u8 {
        self.tables
            .kill_threshold(acting.unit_type(), opposing.unit_type())
    }

    /// Rolls both sides' dice and counts casualties.
    ///
    /// The attacker's dice are rolled first, then the defender's.
    pub fn resolve<D: DiceSource + ?Sized>(
        &self,
        attacker: &Unit,
        defender: &Unit,
        dice: &mut D,
    ) -> MeleeDamageResult {
        let (attacker_dice, attacker_kills) = self.strike(attacker, defender, dice);
        let (defender_dice, defender_kills) = self.strike(defender, attacker, dice);

        MeleeDamageResult {
            attacker_dice,
            defender_dice,
            attacker_kills,
            defender_kills,
        }
    }

    /// One side's half of the melee: its dice and the kills they score.
    fn strike<D: DiceSource + ?Sized>(
        &self,
        acting: &Unit,
        opposing: &Unit,
        dice: &mut D,
    ) -> (Vec<u8>, u32) {
        let num_dice = self.dice_to_roll(acting, opposing);
        let rolled = dice.roll_dice(num_dice);
        let threshold = self.kill_threshold(acting, opposing);
        let kills = count_kills(&rolled, threshold, opposing.count());

        tracing::debug!(
            acting = %acting,
            opposing = %opposing,
            dice = num_dice,
            threshold,
            kills,
            "melee strike"
        );

        (rolled, kills)
    }
}

/// Dice at or above `threshold`, capped at `enemies`.
fn count_kills(rolled: &[u8], threshold: u8, enemies: u32) -> u32 {
    let hits = rolled.iter().filter(|&&face| face >= threshold).count();
    u32::try_from(hits).unwrap_or(u32::MAX).min(enemies)
}
