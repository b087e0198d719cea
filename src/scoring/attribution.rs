//! Play attribution by display name.
//!
//! Scoring-play descriptions carry no athlete ids, only sentences such as
//! "Courtland Sutton 6 Yd pass from Jarrett Stidham". Everything here is a
//! case-sensitive string predicate over an explicitly passed display name.
//! Prefix and substring matching will credit "Mike Williams" for plays by
//! "Mike Williams Jr."; callers get that behaviour unfiltered.

use regex::Regex;
use std::sync::OnceLock;

fn yardage_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)([0-9]+)\s+Yd").expect("yardage pattern is valid"))
}

fn conversion_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\(([^)]+for Two-Point Conversion)\)").expect("conversion pattern is valid")
    })
}

/// First "<N> Yd" figure in a play description, or 0 when there is none.
pub fn parse_yardage(text: &str) -> u32 {
    yardage_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Rusher, receiver or kicker: the description opens with their name.
pub fn is_primary_scorer(text: &str, name: &str) -> bool {
    text.starts_with(name)
}

/// Passer on a passing touchdown: "... pass from <name>".
pub fn is_passer(text: &str, name: &str) -> bool {
    text.contains(&format!("pass from {}", name))
}

/// Inner text of a "(... for Two-Point Conversion)" clause, if any.
pub fn conversion_clause(text: &str) -> Option<&str> {
    conversion_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionRole {
    Pass,
    Reception,
    Rush,
}

impl ConversionRole {
    pub fn label(&self) -> &'static str {
        match self {
            ConversionRole::Pass => "Pass",
            ConversionRole::Reception => "Reception",
            ConversionRole::Rush => "Rush",
        }
    }
}

/// Role `name` played in a conversion clause.
///
/// Pass conversions split on " Pass to "; the passer side is checked first.
/// Rush/run conversions match the name anywhere in the clause.
pub fn conversion_role(clause: &str, name: &str) -> Option<ConversionRole> {
    if clause.contains("Pass to") {
        let (passer, receiver) = clause.split_once(" Pass to ").unwrap_or((clause, ""));
        if passer.contains(name) {
            Some(ConversionRole::Pass)
        } else if receiver.contains(name) {
            Some(ConversionRole::Reception)
        } else {
            None
        }
    } else if (clause.contains("Rush") || clause.contains("Run")) && clause.contains(name) {
        Some(ConversionRole::Rush)
    } else {
        None
    }
}
