use super::attribution::{
    conversion_clause, conversion_role, is_passer, is_primary_scorer, parse_yardage,
    ConversionRole,
};
use super::engine::ScoringDetail;
use super::range::RangeTable;
use super::rules::ScoringRules;
use crate::summary::GameSummary;

const RUSHING_TOUCHDOWN: &str = "Rushing Touchdown";
const PASSING_TOUCHDOWN: &str = "Passing Touchdown";
const FIELD_GOAL_GOOD: &str = "Field Goal Good";

/// Distance bonuses for touchdowns, field goals and two-point conversions,
/// attributed from the scoring-play log by display name.
pub fn add_scoring_play_points(
    player_id: &str,
    summary: &GameSummary,
    rules: &ScoringRules,
    details: &mut Vec<ScoringDetail>,
) {
    let Some(name) = summary.display_name(player_id).filter(|n| !n.is_empty()) else {
        tracing::debug!(player_id, "no boxscore name for player, skipping scoring plays");
        return;
    };

    for play in &summary.scoring_plays {
        let text = play.text.as_str();
        let yards = parse_yardage(text);

        match play.kind.text.as_str() {
            RUSHING_TOUCHDOWN => {
                if is_primary_scorer(text, name) {
                    push_distance(&rules.td_rushing, yards, "Rushing TD", details);
                }
            }
            PASSING_TOUCHDOWN => {
                if is_primary_scorer(text, name) {
                    push_distance(&rules.td_passing_receiving, yards, "Receiving TD", details);
                } else if is_passer(text, name) {
                    push_distance(&rules.td_passing_receiving, yards, "Passing TD", details);
                }
            }
            FIELD_GOAL_GOOD => {
                if is_primary_scorer(text, name) {
                    push_distance(&rules.field_goal, yards, "FG", details);
                }
            }
            _ => {}
        }

        // Conversions ride along on the touchdown play text, independent of type.
        let role = conversion_clause(text).and_then(|clause| conversion_role(clause, name));
        if let Some(role) = role {
            let points = match role {
                ConversionRole::Pass => rules.conversions.pass,
                ConversionRole::Reception => rules.conversions.receive,
                ConversionRole::Rush => rules.conversions.rush,
            };
            details.push(ScoringDetail::new(
                format!("2-Pt Conversion ({})", role.label()),
                points,
            ));
        }
    }
}

fn push_distance(table: &RangeTable, yards: u32, label: &str, details: &mut Vec<ScoringDetail>) {
    if let Some(band) = table.lookup(i64::from(yards)) {
        details.push(ScoringDetail::new(
            format!("{} ({} yds)", label, yards),
            band.points,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(plays: serde_json::Value) -> GameSummary {
        serde_json::from_value(json!({
            "scoringPlays": plays,
            "boxscore": { "players": [{
                "team": { "id": "27", "abbreviation": "TB" },
                "statistics": [
                    {
                        "name": "passing",
                        "labels": ["C/ATT", "YDS"],
                        "athletes": [{ "athlete": { "id": "201", "displayName": "Baker Mayfield" }, "stats": ["20/30", "250"] }]
                    },
                    {
                        "name": "receiving",
                        "labels": ["REC", "YDS"],
                        "athletes": [
                            { "athlete": { "id": "202", "displayName": "Chris Godwin Jr." }, "stats": ["5", "60"] },
                            { "athlete": { "id": "203", "displayName": "" }, "stats": ["1", "4"] }
                        ]
                    },
                    {
                        "name": "kicking",
                        "labels": ["FG", "XP"],
                        "athletes": [{ "athlete": { "id": "204", "displayName": "Chase McLaughlin" }, "stats": ["1/1", "1/1"] }]
                    }
                ]
            }]}
        }))
        .unwrap()
    }

    fn play(kind: &str, text: &str) -> serde_json::Value {
        json!({ "type": { "text": kind }, "text": text, "team": { "id": "27" } })
    }

    fn score(player_id: &str, summary: &GameSummary) -> Vec<ScoringDetail> {
        let mut details = Vec::new();
        add_scoring_play_points(player_id, summary, ScoringRules::standard(), &mut details);
        details
    }

    const CONVERSION_PLAY: &str = "Chris Godwin Jr. 3 Yd pass from Baker Mayfield \
        (Baker Mayfield Pass to Chris Godwin Jr. for Two-Point Conversion)";

    #[test]
    fn test_passer_gets_td_and_conversion() {
        let summary = summary(json!([play("Passing Touchdown", CONVERSION_PLAY)]));
        assert_eq!(
            score("201", &summary),
            vec![
                ScoringDetail::new("Passing TD (3 yds)", 2.0),
                ScoringDetail::new("2-Pt Conversion (Pass)", 1.0),
            ]
        );
    }

    #[test]
    fn test_receiver_gets_td_and_conversion() {
        let summary = summary(json!([play("Passing Touchdown", CONVERSION_PLAY)]));
        assert_eq!(
            score("202", &summary),
            vec![
                ScoringDetail::new("Receiving TD (3 yds)", 2.0),
                ScoringDetail::new("2-Pt Conversion (Reception)", 1.0),
            ]
        );
    }

    #[test]
    fn test_rushing_td_bands() {
        let summary = summary(json!([
            play("Rushing Touchdown", "Baker Mayfield 5 Yd Rush"),
            play("Rushing Touchdown", "Baker Mayfield 6 Yd Rush"),
            play("Rushing Touchdown", "Chris Godwin Jr. 80 Yd Rush")
        ]));
        assert_eq!(
            score("201", &summary),
            vec![
                ScoringDetail::new("Rushing TD (5 yds)", 2.0),
                ScoringDetail::new("Rushing TD (6 yds)", 2.5),
            ]
        );
    }

    #[test]
    fn test_field_goal() {
        let summary = summary(json!([
            play("Field Goal Good", "Chase McLaughlin 52 Yd Field Goal"),
            play("Field Goal Missed", "Chase McLaughlin 58 Yd Field Goal")
        ]));
        assert_eq!(score("204", &summary), vec![ScoringDetail::new("FG (52 yds)", 3.0)]);
    }

    #[test]
    fn test_missing_yardage_uses_lowest_band() {
        let summary = summary(json!([play("Rushing Touchdown", "Baker Mayfield Rush")]));
        assert_eq!(score("201", &summary), vec![ScoringDetail::new("Rushing TD (0 yds)", 2.0)]);
    }

    #[test]
    fn test_rush_conversion_without_td_credit() {
        // Someone else scored the TD; the conversion still counts.
        let summary = summary(json!([play(
            "Rushing Touchdown",
            "Rachaad White 1 Yd Rush (Baker Mayfield Run for Two-Point Conversion)"
        )]));
        assert_eq!(
            score("201", &summary),
            vec![ScoringDetail::new("2-Pt Conversion (Rush)", 1.0)]
        );
    }

    #[test]
    fn test_unknown_player_contributes_nothing() {
        let summary = summary(json!([play("Passing Touchdown", CONVERSION_PLAY)]));
        assert!(score("999", &summary).is_empty());
    }

    #[test]
    fn test_empty_display_name_contributes_nothing() {
        let summary = summary(json!([play("Rushing Touchdown", "Anyone 5 Yd Rush")]));
        assert!(score("203", &summary).is_empty());
    }

    #[test]
    fn test_type_label_must_match_exactly() {
        let summary = summary(json!([play("rushing touchdown", "Baker Mayfield 5 Yd Rush")]));
        assert!(score("201", &summary).is_empty());
    }
}
