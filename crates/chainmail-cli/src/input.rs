//! Interactive input collection.
//!
//! Any unit field missing from the command line is prompted for. Invalid
//! answers are reported and the question is asked again until a valid answer
//! arrives or input ends.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use chainmail_core::{Side, Unit, UnitType};

/// Parses a unit type by exact, case-insensitive name.
///
/// Used both for prompted answers and as a clap value parser.
pub fn parse_unit_type(s: &str) -> std::result::Result<UnitType, String> {
    s.parse::<UnitType>().map_err(|e| e.to_string())
}

/// Parses a strictly positive troop count.
pub fn parse_count(s: &str) -> std::result::Result<u32, String> {
    match s.parse::<u32>() {
        Ok(0) | Err(_) => Err(format!("invalid count: {s}")),
        Ok(count) => Ok(count),
    }
}

/// Comma separated list of unit type names, for prompts.
fn unit_type_list() -> String {
    let names: Vec<&str> = UnitType::all().iter().map(|t| t.name()).collect();
    format!("[{}]", names.join(", "))
}

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output stream.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Builds the unit for `side`, prompting for whichever field is `None`.
    pub fn unit(
        &mut self,
        side: Side,
        unit_type: Option<UnitType>,
        count: Option<u32>,
    ) -> Result<Unit> {
        let unit_type = match unit_type {
            Some(unit_type) => unit_type,
            None => self.unit_type(side)?,
        };
        let count = match count {
            Some(count) => count,
            None => self.count(side)?,
        };
        Ok(Unit::new(unit_type, count)?)
    }

    /// Prompts until a valid unit type is entered.
    pub fn unit_type(&mut self, side: Side) -> Result<UnitType> {
        loop {
            writeln!(self.output, "Enter {side} unit type: {}", unit_type_list())?;
            let line = self.read_line()?;
            match parse_unit_type(&line) {
                Ok(unit_type) => return Ok(unit_type),
                Err(_) => writeln!(self.output, "Invalid unit type: {line}")?,
            }
        }
    }

    /// Prompts until a positive count is entered.
    pub fn count(&mut self, side: Side) -> Result<u32> {
        loop {
            writeln!(self.output, "Enter {side} count:")?;
            let line = self.read_line()?;
            match parse_count(&line) {
                Ok(count) => return Ok(count),
                Err(_) => writeln!(self.output, "Invalid count: {line}")?,
            }
        }
    }

    /// Reads one line without its terminator.
    fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            bail!("input ended before all units were entered");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn count_must_be_positive() {
            assert_eq!(parse_count("12"), Ok(12));
            assert!(parse_count("0").is_err());
            assert!(parse_count("-3").is_err());
            assert!(parse_count("ten").is_err());
            assert!(parse_count("").is_err());
        }

        #[test]
        fn unit_type_is_case_insensitive() {
            assert_eq!(parse_unit_type("heavy_horse"), Ok(UnitType::HeavyHorse));
            assert!(parse_unit_type("heavy horse").is_err());
        }
    }

    mod prompt_tests {
        use super::*;

        #[test]
        fn reads_type_and_count() {
            let mut p = prompter("armored_foot\n15\n");
            let unit = p.unit(Side::Attacker, None, None).unwrap();
            assert_eq!(unit, Unit::new(UnitType::ArmoredFoot, 15).unwrap());

            let out = transcript(p);
            assert!(out.contains("Enter attacker unit type: [LIGHT_FOOT, HEAVY_FOOT, ARMORED_FOOT, LIGHT_HORSE, MEDIUM_HORSE, HEAVY_HORSE]"));
            assert!(out.contains("Enter attacker count:"));
        }

        #[test]
        fn reprompts_until_valid() {
            let mut p = prompter("knights\nLIGHT_HORSE\n0\n-2\nmany\n8\n");
            let unit = p.unit(Side::Defender, None, None).unwrap();
            assert_eq!(unit, Unit::new(UnitType::LightHorse, 8).unwrap());

            let out = transcript(p);
            assert!(out.contains("Invalid unit type: knights"));
            assert!(out.contains("Invalid count: 0"));
            assert!(out.contains("Invalid count: -2"));
            assert!(out.contains("Invalid count: many"));
            assert_eq!(out.matches("Enter defender count:").count(), 4);
        }

        #[test]
        fn skips_fields_given_up_front() {
            let mut p = prompter("7\n");
            let unit = p.unit(Side::Attacker, Some(UnitType::MediumHorse), None).unwrap();
            assert_eq!(unit, Unit::new(UnitType::MediumHorse, 7).unwrap());

            let out = transcript(p);
            assert!(!out.contains("unit type"));
        }

        #[test]
        fn no_prompts_when_fully_specified() {
            let mut p = prompter("");
            let unit = p
                .unit(Side::Defender, Some(UnitType::HeavyFoot), Some(3))
                .unwrap();
            assert_eq!(unit.count(), 3);
            assert!(transcript(p).is_empty());
        }

        #[test]
        fn handles_crlf_line_endings() {
            let mut p = prompter("light_foot\r\n4\r\n");
            let unit = p.unit(Side::Attacker, None, None).unwrap();
            assert_eq!(unit, Unit::new(UnitType::LightFoot, 4).unwrap());
        }

        #[test]
        fn fails_at_end_of_input() {
            let mut p = prompter("nonsense\n");
            let err = p.unit_type(Side::Attacker).unwrap_err();
            assert!(err.to_string().contains("input ended"));
        }
    }
}
