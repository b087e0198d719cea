use serde::{Deserialize, Serialize};

use crate::scoring::RulesConfig;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rule table overrides; absent means the standard rules
    #[serde(default)]
    pub rules: Option<RulesConfig>,
}
