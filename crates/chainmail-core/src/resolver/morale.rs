//! Post-melee morale resolution.
//!
//! Each side's score is its surviving troops weighted by morale rating, plus
//! two bonuses:
//!
//! - **Losses bonus**: `|attacker losses - defender losses| × d6`, to the side
//!   that lost fewer troops
//! - **Survivors bonus**: `|attacker survivors - defender survivors|`, to the
//!   side with more troops left
//!
//! Neither bonus is awarded on a tie. The lower-scoring side then falls back,
//! retreats, routs or surrenders depending on how far behind it is (see
//! [`MoraleBand`]).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::dice::{DiceSource, DIE_FACES};
use crate::tables::CombatTables;
use crate::unit::Unit;

use super::standard_tables;
use super::MeleeDamageResult;

/// One side of a melee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The side that initiated the melee.
    Attacker,
    /// The side that was attacked.
    Defender,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attacker => write!(f, "attacker"),
            Self::Defender => write!(f, "defender"),
        }
    }
}

/// Severity of a morale result, by score difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoraleBand {
    /// 0–19: neither side gives way.
    MeleeContinues,
    /// 20–39: loser falls back 2 moves in good order.
    BackTwoMovesGoodOrder,
    /// 40–59: loser falls back 1 move in good order.
    BackOneMoveGoodOrder,
    /// 60–79: loser retreats 1 move, disordered.
    RetreatsOneMove,
    /// 80–99: loser routs 1.5 moves.
    RoutsOneAndHalfMoves,
    /// 100 and up: loser surrenders.
    Surrenders,
}

/// Inclusive upper bound of each band, scanned in order.
/// Anything past the last bound is [`MoraleBand::Surrenders`].
const MORALE_BANDS: [(u64, MoraleBand); 5] = [
    (19, MoraleBand::MeleeContinues),
    (39, MoraleBand::BackTwoMovesGoodOrder),
    (59, MoraleBand::BackOneMoveGoodOrder),
    (79, MoraleBand::RetreatsOneMove),
    (99, MoraleBand::RoutsOneAndHalfMoves),
];

impl MoraleBand {
    /// Band containing a score difference.
    #[must_use]
    pub fn classify(score_difference: u64) -> Self {
        MORALE_BANDS
            .iter()
            .find(|(upper, _)| score_difference <= *upper)
            .map_or(Self::Surrenders, |&(_, band)| band)
    }
}

/// Final result of the morale check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Score difference under 20; fight another round.
    #[serde(rename = "MELEE_CONTINUES")]
    MeleeContinues,
    /// Attacker falls back 2 moves in good order.
    #[serde(rename = "ATTACKER_BACK_2_MOVES_GOOD_ORDER")]
    AttackerBackTwoMovesGoodOrder,
    /// Attacker falls back 1 move in good order.
    #[serde(rename = "ATTACKER_BACK_1_MOVE_GOOD_ORDER")]
    AttackerBackOneMoveGoodOrder,
    /// Attacker retreats 1 move.
    #[serde(rename = "ATTACKER_RETREATS_1_MOVE")]
    AttackerRetreatsOneMove,
    /// Attacker routs 1.5 moves.
    #[serde(rename = "ATTACKER_ROUTS_1_5_MOVES")]
    AttackerRoutsOneAndHalfMoves,
    /// Attacker surrenders.
    #[serde(rename = "ATTACKER_SURRENDERS")]
    AttackerSurrenders,
    /// Defender falls back 2 moves in good order.
    #[serde(rename = "DEFENDER_BACK_2_MOVES_GOOD_ORDER")]
    DefenderBackTwoMovesGoodOrder,
    /// Defender falls back 1 move in good order.
    #[serde(rename = "DEFENDER_BACK_1_MOVE_GOOD_ORDER")]
    DefenderBackOneMoveGoodOrder,
    /// Defender retreats 1 move.
    #[serde(rename = "DEFENDER_RETREATS_1_MOVE")]
    DefenderRetreatsOneMove,
    /// Defender routs 1.5 moves.
    #[serde(rename = "DEFENDER_ROUTS_1_5_MOVES")]
    DefenderRoutsOneAndHalfMoves,
    /// Defender surrenders.
    #[serde(rename = "DEFENDER_SURRENDERS")]
    DefenderSurrenders,
}

impl Outcome {
    /// All outcomes.
    pub const ALL: [Outcome; 11] = [
        Outcome::MeleeContinues,
        Outcome::AttackerBackTwoMovesGoodOrder,
        Outcome::AttackerBackOneMoveGoodOrder,
        Outcome::AttackerRetreatsOneMove,
        Outcome::AttackerRoutsOneAndHalfMoves,
        Outcome::AttackerSurrenders,
        Outcome::DefenderBackTwoMovesGoodOrder,
        Outcome::DefenderBackOneMoveGoodOrder,
        Outcome::DefenderRetreatsOneMove,
        Outcome::DefenderRoutsOneAndHalfMoves,
        Outcome::DefenderSurrenders,
    ];

    /// Outcome for `loser` at severity `band`.
    ///
    /// [`MoraleBand::MeleeContinues`] maps to [`Outcome::MeleeContinues`]
    /// whichever side is behind.
    #[must_use]
    pub const fn new(loser: Side, band: MoraleBand) -> Self {
        match (loser, band) {
            (_, MoraleBand::MeleeContinues) => Self::MeleeContinues,
            (Side::Attacker, MoraleBand::BackTwoMovesGoodOrder) => Self::AttackerBackTwoMovesGoodOrder,
            (Side::Attacker, MoraleBand::BackOneMoveGoodOrder) => Self::AttackerBackOneMoveGoodOrder,
            (Side::Attacker, MoraleBand::RetreatsOneMove) => Self::AttackerRetreatsOneMove,
            (Side::Attacker, MoraleBand::RoutsOneAndHalfMoves) => Self::AttackerRoutsOneAndHalfMoves,
            (Side::Attacker, MoraleBand::Surrenders) => Self::AttackerSurrenders,
            (Side::Defender, MoraleBand::BackTwoMovesGoodOrder) => Self::DefenderBackTwoMovesGoodOrder,
            (Side::Defender, MoraleBand::BackOneMoveGoodOrder) => Self::DefenderBackOneMoveGoodOrder,
            (Side::Defender, MoraleBand::RetreatsOneMove) => Self::DefenderRetreatsOneMove,
            (Side::Defender, MoraleBand::RoutsOneAndHalfMoves) => Self::DefenderRoutsOneAndHalfMoves,
            (Side::Defender, MoraleBand::Surrenders) => Self::DefenderSurrenders,
        }
    }

    /// Rulebook label, e.g. `ATTACKER_ROUTS_1_5_MOVES`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MeleeContinues => "MELEE_CONTINUES",
            Self::AttackerBackTwoMovesGoodOrder => "ATTACKER_BACK_2_MOVES_GOOD_ORDER",
            Self::AttackerBackOneMoveGoodOrder => "ATTACKER_BACK_1_MOVE_GOOD_ORDER",
            Self::AttackerRetreatsOneMove => "ATTACKER_RETREATS_1_MOVE",
            Self::AttackerRoutsOneAndHalfMoves => "ATTACKER_ROUTS_1_5_MOVES",
            Self::AttackerSurrenders => "ATTACKER_SURRENDERS",
            Self::DefenderBackTwoMovesGoodOrder => "DEFENDER_BACK_2_MOVES_GOOD_ORDER",
            Self::DefenderBackOneMoveGoodOrder => "DEFENDER_BACK_1_MOVE_GOOD_ORDER",
            Self::DefenderRetreatsOneMove => "DEFENDER_RETREATS_1_MOVE",
            Self::DefenderRoutsOneAndHalfMoves => "DEFENDER_ROUTS_1_5_MOVES",
            Self::DefenderSurrenders => "DEFENDER_SURRENDERS",
        }
    }

    /// The side that gives way, or `None` if the melee continues.
    #[must_use]
    pub const fn losing_side(self) -> Option<Side> {
        match self {
            Self::MeleeContinues => None,
            Self::AttackerBackTwoMovesGoodOrder
            | Self::AttackerBackOneMoveGoodOrder
            | Self::AttackerRetreatsOneMove
            | Self::AttackerRoutsOneAndHalfMoves
            | Self::AttackerSurrenders => Some(Side::Attacker),
            Self::DefenderBackTwoMovesGoodOrder
            | Self::DefenderBackOneMoveGoodOrder
            | Self::DefenderRetreatsOneMove
            | Self::DefenderRoutsOneAndHalfMoves
            | Self::DefenderSurrenders => Some(Side::Defender),
        }
    }

    /// Severity of this outcome.
    #[must_use]
    pub const fn band(self) -> MoraleBand {
        match self {
            Self::MeleeContinues => MoraleBand::MeleeContinues,
            Self::AttackerBackTwoMovesGoodOrder | Self::DefenderBackTwoMovesGoodOrder => {
                MoraleBand::BackTwoMovesGoodOrder
            }
            Self::AttackerBackOneMoveGoodOrder | Self::DefenderBackOneMoveGoodOrder => {
                MoraleBand::BackOneMoveGoodOrder
            }
            Self::AttackerRetreatsOneMove | Self::DefenderRetreatsOneMove => {
                MoraleBand::RetreatsOneMove
            }
            Self::AttackerRoutsOneAndHalfMoves | Self::DefenderRoutsOneAndHalfMoves => {
                MoraleBand::RoutsOneAndHalfMoves
            }
            Self::AttackerSurrenders | Self::DefenderSurrenders => MoraleBand::Surrenders,
        }
    }

    /// Whether another round of melee should be fought.
    #[must_use]
    pub const fn melee_continues(self) -> bool {
        matches!(self, Self::MeleeContinues)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(loser) = self.losing_side() else {
            return write!(f, "melee continues");
        };
        match self.band() {
            MoraleBand::MeleeContinues => write!(f, "melee continues"),
            MoraleBand::BackTwoMovesGoodOrder => {
                write!(f, "{loser} falls back 2 moves in good order")
            }
            MoraleBand::BackOneMoveGoodOrder => {
                write!(f, "{loser} falls back 1 move in good order")
            }
            MoraleBand::RetreatsOneMove => write!(f, "{loser} retreats 1 move"),
            MoraleBand::RoutsOneAndHalfMoves => write!(f, "{loser} routs 1.5 moves"),
            MoraleBand::Surrenders => write!(f, "{loser} surrenders"),
        }
    }
}

/// Scores and outcome of the morale check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeleeMoraleResult {
    attacker_score: u64,
    defender_score: u64,
    die_roll: u8,
    outcome: Outcome,
}

impl PostMeleeMoraleResult {
    /// Attacker's morale score.
    #[must_use]
    pub fn attacker_score(&self) -> u64 {
        self.attacker_score
    }

    /// Defender's morale score.
    #[must_use]
    pub fn defender_score(&self) -> u64 {
        self.defender_score
    }

    /// Absolute difference between the two scores.
    #[must_use]
    pub fn score_difference(&self) -> u64 {
        self.attacker_score.abs_diff(self.defender_score)
    }

    /// The die multiplied into the losses bonus.
    #[must_use]
    pub fn die_roll(&self) -> u8 {
        self.die_roll
    }

    /// Classified outcome.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// Resolves the morale step after a melee.
///
/// # Example
///
/// ```
/// use chainmail_core::resolver::{MeleeDamageResult, MoraleResolver, Outcome};
/// use chainmail_core::unit::{Unit, UnitType};
///
/// // Survivors after the attacker killed 30 and lost none.
/// let attacker = Unit::new(UnitType::HeavyHorse, 20).unwrap();
/// let defender = Unit::new(UnitType::LightFoot, 10).unwrap();
/// let melee = MeleeDamageResult::new(vec![6; 30], vec![], 30, 0);
///
/// let result = MoraleResolver::standard().resolve_with_roll(&attacker, &defender, &melee, 1);
///
/// // 20×9 + 30×1 + 10 = 220 against 10×4 = 40
/// assert_eq!(result.attacker_score(), 220);
/// assert_eq!(result.defender_score(), 40);
/// assert_eq!(result.outcome(), Outcome::DefenderSurrenders);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoraleResolver<'t> {
    tables: &'t CombatTables,
}

impl MoraleResolver<'static> {
    /// A resolver using the standard tables.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_tables())
    }
}

impl Default for MoraleResolver<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'t> MoraleResolver<'t> {
    /// A resolver using `tables`.
    #[must_use]
    pub fn new(tables: &'t CombatTables) -> Self {
        Self { tables }
    }

    /// Rolls one die and resolves morale.
    ///
    /// `attacker` and `defender` are the units *after* melee casualties.
    pub fn resolve<D: DiceSource + ?Sized>(
        &self,
        attacker: &Unit,
        defender: &Unit,
        melee: &MeleeDamageResult,
        dice: &mut D,
    ) -> PostMeleeMoraleResult {
        let die_roll = dice.roll_die();
        self.resolve_with_roll(attacker, defender, melee, die_roll)
    }

    /// Resolves morale with a known die roll.
    ///
    /// # Panics
    ///
    /// Panics if `die_roll` is not a die face (1–6).
    #[must_use]
    pub fn resolve_with_roll(
        &self,
        attacker: &Unit,
        defender: &Unit,
        melee: &MeleeDamageResult,
        die_roll: u8,
    ) -> PostMeleeMoraleResult {
        assert!(
            (1..=DIE_FACES).contains(&die_roll),
            "die roll {die_roll} is not a die face"
        );

        let attacker_losses = u64::from(melee.attacker_losses());
        let defender_losses = u64::from(melee.defender_losses());
        let losses_bonus = attacker_losses.abs_diff(defender_losses) * u64::from(die_roll);

        let attacker_count = u64::from(attacker.count());
        let defender_count = u64::from(defender.count());
        let survivors_bonus = attacker_count.abs_diff(defender_count);

        let mut attacker_score =
            attacker_count * u64::from(self.tables.morale_rating(attacker.unit_type()));
        let mut defender_score =
            defender_count * u64::from(self.tables.morale_rating(defender.unit_type()));

        match attacker_losses.cmp(&defender_losses) {
            Ordering::Less => attacker_score += losses_bonus,
            Ordering::Greater => defender_score += losses_bonus,
            Ordering::Equal => {}
        }

        match attacker_count.cmp(&defender_count) {
            Ordering::Greater => attacker_score += survivors_bonus,
            Ordering::Less => defender_score += survivors_bonus,
            Ordering::Equal => {}
        }

        // Equal scores fall on the defender-relative branch; the difference is
        // zero there, so the outcome is always MeleeContinues.
        let loser = if attacker_score > defender_score {
            Side::Defender
        } else {
            Side::Attacker
        };
        let band = MoraleBand::classify(attacker_score.abs_diff(defender_score));
        let outcome = Outcome::new(loser, band);

        tracing::debug!(
            attacker_score,
            defender_score,
            die_roll,
            losses_bonus,
            survivors_bonus,
            ?outcome,
            "morale resolved"
        );

        PostMeleeMoraleResult {
            attacker_score,
            defender_score,
            die_roll,
            outcome,
        }
    }
}
