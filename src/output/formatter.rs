use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::lineup::LineupSlot;
use crate::scoring::{RangeTable, ScoreResult, ScoringRules};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points compactly: "7", "2.5", "1.25"
pub fn format_points(points: f64) -> String {
    let formatted = format!("{:.2}", points);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a score breakdown as a header line plus one line per award
/// Format: "{player} ({team} vs {opp}) - {status}: {total} pts"
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let total = format!("{} pts", format_points(result.total_points));
    let mut lines = Vec::with_capacity(result.details.len() + 1);

    if use_colors {
        lines.push(format!(
            "{} ({} vs {}) - {}: {}",
            result.player_id.bold(),
            result.team_abbr.cyan(),
            result.opponent_abbr.cyan(),
            result.game_status.yellow(),
            total.bold().green()
        ));
    } else {
        lines.push(format!(
            "{} ({} vs {}) - {}: {}",
            result.player_id, result.team_abbr, result.opponent_abbr, result.game_status, total
        ));
    }

    if result.details.is_empty() {
        lines.push("  No scoring events.".to_string());
    }

    for detail in &result.details {
        let points = format!("{:>6}", format_points(detail.points));
        if use_colors {
            lines.push(format!("  {}  {}", points.green(), detail.reason));
        } else {
            lines.push(format!("  {}  {}", points, detail.reason));
        }
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a scored lineup with columns: Index, Points, Position, Name, Opponent, Status
/// Points column is right-aligned, 6 chars wide (fits "123.25")
/// `results` must be in slot order.
pub fn format_lineup_table(
    slots: &[LineupSlot],
    results: &[ScoreResult],
    total_points: f64,
    use_colors: bool,
) -> String {
    if slots.is_empty() {
        return "No players in lineup.".to_string();
    }

    let term_width = get_terminal_width();
    let points_width = 6;
    let position_width = 5;
    let separator = "  ";

    let mut lines: Vec<String> = slots
        .iter()
        .zip(results.iter())
        .enumerate()
        .map(|(idx, (slot, result))| {
            let index_str = format!("{:>2}.", idx + 1);
            let points_str = format!(
                "{:>width$}",
                format_points(result.total_points),
                width = points_width
            );
            let position = format!(
                "{:<width$}",
                slot.position.as_deref().unwrap_or("-"),
                width = position_width
            );
            let matchup = format!("vs {}  {}", result.opponent_abbr, result.game_status);

            let name = slot.name.as_deref().unwrap_or(&slot.player_id);
            let fixed_width =
                3 + 1 + points_width + position_width + separator.len() * 3 + matchup.len();
            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_text(name, width - fixed_width)
                } else {
                    truncate_text(name, 20)
                }
            } else {
                name.to_string()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    points_str.bold(),
                    separator,
                    position.cyan(),
                    separator,
                    name,
                    separator,
                    matchup.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, points_str, separator, position, separator, name, separator, matchup
                )
            }
        })
        .collect();

    let total = format!("Total: {} pts", format_points(total_points));
    if use_colors {
        lines.push(total.bold().to_string());
    } else {
        lines.push(total);
    }

    lines.join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: player_id, points, status, opponent (no headers, no colors)
pub fn format_tsv(results: &[ScoreResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}",
                r.player_id,
                format_points(r.total_points),
                r.game_status,
                r.opponent_abbr
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_table(name: &str, table: &RangeTable) -> String {
    let bands = table
        .bands()
        .iter()
        .map(|band| format!("{} → {}", band, format_points(band.points)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{:<22}{}", name, bands)
}

/// Human-readable dump of the effective rule table
pub fn format_rules(rules: &ScoringRules) -> String {
    let d = &rules.defense;
    let r = &rules.return_special_teams;
    let c = &rules.conversions;
    [
        format!("Rule table v{}", rules.version),
        format_table("Rushing TD", &rules.td_rushing),
        format_table("Passing/Receiving TD", &rules.td_passing_receiving),
        format_table("Field goal", &rules.field_goal),
        format!("{:<22}{} each", "PAT", format_points(rules.pat)),
        format_table("Rushing total", &rules.rushing_game_total),
        format_table("Passing total", &rules.passing_game_total),
        format_table("Receiving total", &rules.receiving_game_total),
        format!(
            "{:<22}safety {}, held < 10 (win) {}, TD {}, shutout {}",
            "Defense",
            format_points(d.safety),
            format_points(d.hold_under_10),
            format_points(d.touchdown),
            format_points(d.shutout)
        ),
        format!(
            "{:<22}safety {}, other {}, punt {}, kickoff {} (not detected)",
            "Return special teams",
            format_points(r.safety),
            format_points(r.other_scores),
            format_points(r.punt),
            format_points(r.kickoff)
        ),
        format!(
            "{:<22}pass {}, rush {}, receive {}",
            "2-pt conversions",
            format_points(c.pass),
            format_points(c.rush),
            format_points(c.receive)
        ),
        format!(
            "{:<22}yards '{}', extra points '{}'",
            "Columns", rules.columns.yards, rules.columns.extra_points
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringDetail;

    fn sample_result() -> ScoreResult {
        ScoreResult {
            player_id: "101".to_string(),
            total_points: 7.0,
            details: vec![
                ScoringDetail::new("Passing Total: 315 yds", 2.0),
                ScoringDetail::new("Passing TD (25 yds)", 3.0),
                ScoringDetail::new("Rushing TD (6 yds)", 2.5),
            ],
            game_status: "Final".to_string(),
            opponent_abbr: "DEN".to_string(),
            team_abbr: "KC".to_string(),
        }
    }

    fn sample_slot() -> LineupSlot {
        LineupSlot {
            player_id: "101".to_string(),
            name: Some("Patrick Mahomes".to_string()),
            position: Some("QB".to_string()),
            team_id: Some("12".to_string()),
        }
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(7.0), "7");
        assert_eq!(format_points(2.5), "2.5");
        assert_eq!(format_points(1.25), "1.25");
        assert_eq!(format_points(0.0), "0");
        assert_eq!(format_points(10.0), "10");
        assert_eq!(format_points(-0.0), "0");
    }

    #[test]
    fn test_format_breakdown() {
        let result = format_breakdown(&sample_result(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "101 (KC vs DEN) - Final: 7 pts");
        assert_eq!(lines[1], "       2  Passing Total: 315 yds");
        assert!(lines[3].ends_with("2.5  Rushing TD (6 yds)"));
    }

    #[test]
    fn test_format_breakdown_empty() {
        let mut result = sample_result();
        result.details.clear();
        result.total_points = 0.0;
        let output = format_breakdown(&result, false);
        assert!(output.contains("0 pts"));
        assert!(output.contains("No scoring events."));
    }

    #[test]
    fn test_truncate_text_long() {
        assert_eq!(truncate_text("Christian McCaffrey", 10), "Christi...");
        assert_eq!(truncate_text("Short", 10), "Short");
        assert_eq!(truncate_text("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_lineup_table_empty() {
        assert_eq!(format_lineup_table(&[], &[], 0.0, false), "No players in lineup.");
    }

    #[test]
    fn test_format_lineup_table() {
        let slots = vec![sample_slot()];
        let results = vec![sample_result()];
        let output = format_lineup_table(&slots, &results, 7.0, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("QB"));
        assert!(lines[0].contains("vs DEN  Final"));
        assert_eq!(lines[1], "Total: 7 pts");
    }

    #[test]
    fn test_format_lineup_table_falls_back_to_id() {
        let mut slot = sample_slot();
        slot.name = None;
        slot.position = None;
        let output = format_lineup_table(&[slot], &[sample_result()], 7.0, false);
        assert!(output.contains("101"));
        assert!(output.contains("-    "));
    }

    #[test]
    fn test_format_tsv() {
        let mut second = sample_result();
        second.player_id = "102".to_string();
        second.total_points = 5.25;
        let output = format_tsv(&[sample_result(), second]);
        assert_eq!(output, "101\t7\tFinal\tDEN\n102\t5.25\tFinal\tDEN");
    }

    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_rules_lists_every_category() {
        let output = format_rules(ScoringRules::standard());
        assert!(output.contains("Rule table v1"));
        assert!(output.contains("0-5 → 2, 6-10 → 2.5"));
        assert!(output.contains("600+ → 6"));
        assert!(output.contains("PAT"));
        assert!(output.contains("shutout 4"));
        assert!(output.contains("kickoff 4"));
        assert!(output.contains("extra points 'XP'"));
    }
}
