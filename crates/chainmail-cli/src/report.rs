//! Rendering of a resolved round.

use std::io::Write;

use anyhow::Result;
use chainmail_core::RoundReport;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for the round report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human readable blocks.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// JSON output structure
#[derive(Serialize)]
struct JsonReport<'a> {
    seed: u64,
    #[serde(flatten)]
    round: &'a RoundReport,
}

/// Writes `report` to `out` in `format`.
pub fn render(report: &RoundReport, seed: u64, format: Format, out: &mut impl Write) -> Result<()> {
    match format {
        Format::Text => render_text(report, seed, out),
        Format::Json => render_json(report, seed, out),
    }
}

/// Melee and morale blocks, one line per value.
pub fn render_text(report: &RoundReport, seed: u64, out: &mut impl Write) -> Result<()> {
    let melee = &report.melee;
    let morale = &report.morale;

    writeln!(out, "Seed: {seed}")?;
    writeln!(out)?;

    writeln!(out, "===== Melee =====")?;
    writeln!(out, "Attacker: {}", report.attacker)?;
    writeln!(out, "Defender: {}", report.defender)?;
    writeln!(out)?;
    writeln!(out, "Attacker dice rolled: {:?}", melee.attacker_dice())?;
    writeln!(out, "Defender dice rolled: {:?}", melee.defender_dice())?;
    writeln!(out, "Attacker kills: {}", melee.attacker_kills())?;
    writeln!(out, "Defender kills: {}", melee.defender_kills())?;
    writeln!(out)?;

    writeln!(out, "===== Post-Melee Morale =====")?;
    writeln!(out, "Attacker: {}", report.attacker_after)?;
    writeln!(out, "Defender: {}", report.defender_after)?;
    writeln!(out)?;
    writeln!(out, "Die roll: {}", morale.die_roll())?;
    writeln!(out, "Attacker score: {}", morale.attacker_score())?;
    writeln!(out, "Defender score: {}", morale.defender_score())?;
    writeln!(
        out,
        "Outcome: {} ({})",
        morale.outcome().label(),
        morale.outcome()
    )?;
    Ok(())
}

/// The report as pretty-printed JSON with the seed alongside.
pub fn render_json(report: &RoundReport, seed: u64, out: &mut impl Write) -> Result<()> {
    let json = JsonReport {
        seed,
        round: report,
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainmail_core::{CombatTables, Engine, ScriptedDice, Unit, UnitType};

    /// Heavy foot (3) against light foot (4) with fixed dice.
    fn scripted_report() -> RoundReport {
        let attacker = Unit::new(UnitType::HeavyFoot, 3).unwrap();
        let defender = Unit::new(UnitType::LightFoot, 4).unwrap();
        let dice = ScriptedDice::new([5, 6, 2, 6, 1, 3]).unwrap();
        Engine::with_dice(CombatTables::standard(), dice)
            .unwrap()
            .resolve_round(&attacker, &defender)
            .unwrap()
    }

    fn rendered(format: Format) -> String {
        let mut out = Vec::new();
        render(&scripted_report(), 77, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_has_both_blocks() {
        let text = rendered(Format::Text);
        let expected = "\
Seed: 77

===== Melee =====
Attacker: HEAVY_FOOT x3
Defender: LIGHT_FOOT x4

Attacker dice rolled: [5, 6, 2]
Defender dice rolled: [6, 1]
Attacker kills: 2
Defender kills: 1

===== Post-Melee Morale =====
Attacker: HEAVY_FOOT x2
Defender: LIGHT_FOOT x2

Die roll: 3
Attacker score: 13
Defender score: 8
Outcome: MELEE_CONTINUES (melee continues)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn json_carries_seed_and_round() {
        let json: serde_json::Value = serde_json::from_str(&rendered(Format::Json)).unwrap();
        assert_eq!(json["seed"], 77);
        assert_eq!(json["attacker"]["type"], "heavy_foot");
        assert_eq!(json["defender_after"]["count"], 2);
        assert_eq!(json["melee"]["attacker_dice"], serde_json::json!([5, 6, 2]));
        assert_eq!(json["morale"]["outcome"], "MELEE_CONTINUES");
    }
}
