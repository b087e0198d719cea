pub mod attribution;
pub mod boxscore;
pub mod config;
pub mod defense;
pub mod engine;
pub mod plays;
pub mod range;
pub mod rules;
pub mod validation;

pub use config::*;
pub use engine::{
    calculate_player_score, round_points, ScoreResult, ScoringDetail, UNKNOWN_ABBR, UNKNOWN_STATUS,
};
pub use range::{RangeBand, RangeTable};
pub use rules::{
    ConversionRules, DefenseRules, ReturnRules, ScoringRules, StatColumns, DST_POSITION,
    RULES_VERSION,
};
pub use validation::validate_rules;
