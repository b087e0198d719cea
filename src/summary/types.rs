use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A game summary as returned by ESPN's site API `/summary` endpoint.
///
/// Only the fields the scoring engine reads are modelled. Every field is
/// optional on the wire and defaults to empty, so a partially-populated
/// summary (scheduled game, feed hiccup) still decodes.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSummary {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    pub header: Header,
    pub scoring_plays: Vec<ScoringPlay>,
    pub boxscore: Boxscore,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Header {
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Competition {
    pub competitors: Vec<Competitor>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Competitor {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub score: String,
    pub winner: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Status {
    #[serde(rename = "type")]
    pub kind: StatusType,
}

/// Status tuple, e.g. `STATUS_FINAL` / `Final` / `Final/OT`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StatusType {
    pub name: String,
    pub description: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScoringPlay {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PlayType,
    /// Free-text description, e.g. "Travis Kelce 25 Yd pass from Patrick Mahomes"
    pub text: String,
    pub team: TeamId,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlayType {
    /// Type label, e.g. "Rushing Touchdown", "Field Goal Good"
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TeamId {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Boxscore {
    pub players: Vec<TeamBoxscore>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TeamBoxscore {
    pub team: TeamRef,
    pub statistics: Vec<StatGroup>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TeamRef {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    pub abbreviation: String,
}

/// One statistic group ("rushing", "passing", ...) for one team.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StatGroup {
    pub name: String,
    pub labels: Vec<String>,
    pub athletes: Vec<AthleteLine>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AthleteLine {
    pub athlete: Athlete,
    /// Stat values aligned to the group's `labels`
    pub stats: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Athlete {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    pub display_name: String,
}

impl GameSummary {
    /// The first (and in practice only) competition in the header.
    pub fn competition(&self) -> Option<&Competition> {
        self.header.competitions.first()
    }

    /// Most specific status text available: `detail`, then `description`.
    pub fn status_text(&self) -> Option<&str> {
        let kind = &self.competition()?.status.as_ref()?.kind;
        [kind.detail.as_str(), kind.description.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }

    /// Team ids of every competitor in the header.
    pub fn competitor_ids(&self) -> impl Iterator<Item = &str> {
        self.competition()
            .into_iter()
            .flat_map(|c| c.competitors.iter())
            .map(|c| c.id.as_str())
    }

    /// Boxscore entry whose athlete rows include `athlete_id`.
    pub fn team_of_athlete(&self, athlete_id: &str) -> Option<&TeamBoxscore> {
        self.boxscore
            .players
            .iter()
            .find(|team| team.statistics.iter().any(|g| g.row_for(athlete_id).is_some()))
    }

    /// Boxscore entry for a team id.
    pub fn team_by_id(&self, team_id: &str) -> Option<&TeamBoxscore> {
        self.boxscore.players.iter().find(|team| team.team.id == team_id)
    }

    /// First boxscore entry whose team id differs from `team_id`.
    pub fn opponent_of(&self, team_id: &str) -> Option<&TeamBoxscore> {
        self.boxscore.players.iter().find(|team| team.team.id != team_id)
    }

    /// Display name from the first statistic row matching `athlete_id`,
    /// searching every group of every team in order.
    pub fn display_name(&self, athlete_id: &str) -> Option<&str> {
        self.boxscore
            .players
            .iter()
            .flat_map(|team| team.statistics.iter())
            .find_map(|group| group.row_for(athlete_id))
            .map(|line| line.athlete.display_name.as_str())
    }
}

impl StatGroup {
    /// First row in this group for `athlete_id`.
    pub fn row_for(&self, athlete_id: &str) -> Option<&AthleteLine> {
        self.athletes.iter().find(|a| a.athlete.id == athlete_id)
    }

    /// Map column labels to the row's values. Labels without a value are
    /// left out; a repeated label keeps its last value.
    pub fn columns<'a>(&'a self, line: &'a AthleteLine) -> HashMap<&'a str, &'a str> {
        self.labels
            .iter()
            .zip(line.stats.iter())
            .map(|(label, value)| (label.as_str(), value.as_str()))
            .collect()
    }
}

/// Accept a JSON string, number, bool or null and keep it as a string.
/// ESPN is inconsistent about quoting ids and scores.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) => s,
        Some(Raw::Int(n)) => n.to_string(),
        Some(Raw::Float(n)) => n.to_string(),
        Some(Raw::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_minimal_summary() {
        let summary: GameSummary = serde_json::from_value(json!({})).unwrap();
        assert!(summary.header.competitions.is_empty());
        assert!(summary.scoring_plays.is_empty());
        assert!(summary.boxscore.players.is_empty());
        assert!(summary.status_text().is_none());
    }

    #[test]
    fn test_numeric_ids_decode_as_strings() {
        let summary: GameSummary = serde_json::from_value(json!({
            "id": 401547,
            "header": { "competitions": [{
                "competitors": [
                    { "id": 12, "score": 31, "winner": true },
                    { "id": "7", "score": null }
                ]
            }]}
        }))
        .unwrap();

        assert_eq!(summary.id, "401547");
        let competitors = &summary.competition().unwrap().competitors;
        assert_eq!(competitors[0].id, "12");
        assert_eq!(competitors[0].score, "31");
        assert_eq!(competitors[1].score, "");
        assert!(!competitors[1].winner);
    }

    #[test]
    fn test_status_text_prefers_detail() {
        let summary: GameSummary = serde_json::from_value(json!({
            "header": { "competitions": [{
                "status": { "type": {
                    "name": "STATUS_IN_PROGRESS",
                    "description": "In Progress",
                    "detail": "3rd Quarter 2:10"
                }}
            }]}
        }))
        .unwrap();
        assert_eq!(summary.status_text(), Some("3rd Quarter 2:10"));
    }

    #[test]
    fn test_status_text_falls_back_to_description() {
        let summary: GameSummary = serde_json::from_value(json!({
            "header": { "competitions": [{
                "status": { "type": { "description": "Final", "detail": "" } }
            }]}
        }))
        .unwrap();
        assert_eq!(summary.status_text(), Some("Final"));
    }

    #[test]
    fn test_boxscore_lookups() {
        let summary: GameSummary = serde_json::from_value(json!({
            "boxscore": { "players": [
                {
                    "team": { "id": "12", "abbreviation": "KC" },
                    "statistics": [{
                        "name": "rushing",
                        "labels": ["CAR", "YDS", "TD"],
                        "athletes": [{
                            "athlete": { "id": "101", "displayName": "Patrick Mahomes" },
                            "stats": ["5", "45", "1"]
                        }]
                    }]
                },
                { "team": { "id": "7", "abbreviation": "DEN" }, "statistics": [] }
            ]}
        }))
        .unwrap();

        assert_eq!(summary.display_name("101"), Some("Patrick Mahomes"));
        assert!(summary.display_name("999").is_none());
        assert_eq!(summary.team_of_athlete("101").unwrap().team.abbreviation, "KC");
        assert_eq!(summary.opponent_of("12").unwrap().team.abbreviation, "DEN");
        assert_eq!(summary.team_by_id("7").unwrap().team.abbreviation, "DEN");

        let group = &summary.boxscore.players[0].statistics[0];
        let line = group.row_for("101").unwrap();
        let columns = group.columns(line);
        assert_eq!(columns.get("YDS"), Some(&"45"));
        assert!(columns.get("LONG").is_none());
    }

    #[test]
    fn test_columns_ignore_missing_values() {
        let group = StatGroup {
            name: "kicking".to_string(),
            labels: vec!["FG".to_string(), "XP".to_string()],
            athletes: vec![AthleteLine {
                athlete: Athlete {
                    id: "1".to_string(),
                    display_name: "K".to_string(),
                },
                stats: vec!["1/1".to_string()],
            }],
        };
        let columns = group.columns(&group.athletes[0]);
        assert_eq!(columns.len(), 1);
        assert!(columns.get("XP").is_none());
    }
}
