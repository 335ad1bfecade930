//! Report structures and their ordered JSON form.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::model::Component;

/// Position labels, best first. Ranking lists never exceed this length.
pub const RANK_LABELS: [&str; 3] = ["1st", "2nd", "3rd"];

/// One position in a per-component leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    #[serde(rename = "CampusID")]
    pub campus_id: String,
    #[serde(rename = "Score")]
    pub score: i64,
    #[serde(rename = "Rank")]
    pub rank: &'static str,
}

/// Complete summary for one run. Built once from the full record set and
/// immutable afterward; printed to the console and optionally exported
/// as JSON.
#[derive(Debug, Default)]
pub struct Report {
    /// Per-component means, in declared component order. Empty when the
    /// record set is empty.
    pub averages: Vec<(Component, f64)>,
    /// Mean of `Total` per branch. The map keeps branch labels sorted.
    pub branch_averages: BTreeMap<String, f64>,
    /// Up to three entries per component, in declared component order.
    pub rankings: Vec<(Component, Vec<RankingEntry>)>,
    /// Validation diagnostics, in input order.
    pub errors: Vec<String>,
}

/// Serializes component-keyed pairs as a JSON map without losing the
/// declared order (a plain `HashMap` would shuffle the keys).
struct ComponentMap<'a, T>(&'a [(Component, T)]);

impl<T: Serialize> Serialize for ComponentMap<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (component, value) in self.0 {
            map.serialize_entry(component.name(), value)?;
        }
        map.end()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("Averages", &ComponentMap(&self.averages))?;
        map.serialize_entry("BranchAverages", &self.branch_averages)?;
        map.serialize_entry("Rankings", &ComponentMap(&self.rankings))?;
        map.serialize_entry("Errors", &self.errors)?;
        map.end()
    }
}
