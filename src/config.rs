/// Query configuration and UI-selection decoding.
///
/// Presentation layers offer an "Overall" entry in their year and region
/// pickers. The query layer never sees that sentinel: `selector` turns it
/// into `None`, meaning "no filter on this dimension".
use crate::error::{Result, TableError};

pub const DEFAULT_LEADERBOARD_TOP: usize = 15;
pub const DEFAULT_OVERALL_LABEL: &str = "Overall";

const ENV_LEADERBOARD_TOP: &str = "OLYMPICS_LEADERBOARD_TOP";
const ENV_OVERALL_LABEL: &str = "OLYMPICS_OVERALL_LABEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Rows returned by the athlete leaderboard
    pub leaderboard_top: usize,
    /// Selector label meaning "no filter"
    pub overall_label: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            leaderboard_top: DEFAULT_LEADERBOARD_TOP,
            overall_label: DEFAULT_OVERALL_LABEL.to_string(),
        }
    }
}

impl QueryConfig {
    /// Read overrides from `OLYMPICS_LEADERBOARD_TOP` and
    /// `OLYMPICS_OVERALL_LABEL`. Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QueryConfig::default();

        if let Some(raw) = lookup(ENV_LEADERBOARD_TOP) {
            match raw.trim().parse::<usize>() {
                Ok(top) if top > 0 => config.leaderboard_top = top,
                _ => log::warn!(
                    "ignoring {}={:?}: expected a positive integer",
                    ENV_LEADERBOARD_TOP,
                    raw
                ),
            }
        }

        if let Some(label) = lookup(ENV_OVERALL_LABEL) {
            let label = label.trim();
            if label.is_empty() {
                log::warn!("ignoring empty {}", ENV_OVERALL_LABEL);
            } else {
                config.overall_label = label.to_string();
            }
        }

        config
    }

    /// Decode a raw selection: the overall label and "" mean no filter.
    pub fn selector<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let raw = raw.trim();
        if raw.is_empty() || raw == self.overall_label {
            None
        } else {
            Some(raw)
        }
    }

    /// Decode a raw year selection.
    pub fn year_selector(&self, raw: &str) -> Result<Option<i32>> {
        self.selector(raw)
            .map(|year| {
                year.parse::<i32>()
                    .map_err(|_| TableError::InvalidConfig(format!("'{}' is not a year", year)))
            })
            .transpose()
    }
}
