pub mod types;

pub use types::{
    Athlete, AthleteLine, Boxscore, Competition, Competitor, GameSummary, PlayType, ScoringPlay,
    Status, StatusType, StatGroup, TeamBoxscore, TeamId, TeamRef,
};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a game summary previously saved as JSON.
pub fn load_summary(path: &Path) -> Result<GameSummary> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open game summary at {}", path.display()))?;

    let summary: GameSummary = serde_json::from_reader(BufReader::new(file))
        .with_context(|| {
            format!(
                "Failed to parse game summary: invalid JSON in {}",
                path.display()
            )
        })?;

    tracing::debug!(
        game = %summary.id,
        plays = summary.scoring_plays.len(),
        teams = summary.boxscore.players.len(),
        "loaded game summary"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_summary_is_error() {
        let path = env::temp_dir().join("gridiron_bonus_test_missing_summary.json");
        let _ = std::fs::remove_file(&path);

        let err = load_summary(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to open game summary"));
    }

    #[test]
    fn test_load_summary_from_disk() {
        let path = env::temp_dir().join("gridiron_bonus_test_summary.json");
        std::fs::write(&path, r#"{"id": "1", "scoringPlays": [{"type": {"text": "Safety"}}]}"#)
            .unwrap();

        let summary = load_summary(&path).unwrap();
        assert_eq!(summary.id, "1");
        assert_eq!(summary.scoring_plays[0].kind.text, "Safety");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let path = env::temp_dir().join("gridiron_bonus_test_invalid_summary.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_summary(&path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));

        let _ = std::fs::remove_file(&path);
    }
}
