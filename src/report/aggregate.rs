use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{COMPONENTS, StudentRecord};
use crate::report::types::{RANK_LABELS, RankingEntry, Report};
use crate::report::utility::mean;

/// Builds the summary [`Report`] over the (already filtered) record set.
///
/// Every record contributes, validation failures included. The empty set is
/// an explicit branch yielding empty averages and rankings, never a division
/// by zero; a class filter that matched nothing lands here too.
pub fn generate_report(records: &[StudentRecord], diagnostics: Vec<String>) -> Report {
    if records.is_empty() {
        debug!("No records to aggregate, producing empty report");
        return Report {
            errors: diagnostics,
            ..Report::default()
        };
    }

    let mut averages = Vec::with_capacity(COMPONENTS.len());
    let mut rankings = Vec::with_capacity(COMPONENTS.len());

    for component in COMPONENTS {
        let scores: Vec<i64> = records.iter().map(|r| r.score(component)).collect();
        averages.push((component, mean(&scores)));
        rankings.push((component, top_three(records, &scores)));
    }

    let mut branch_sums: BTreeMap<&str, (i64, usize)> = BTreeMap::new();
    for record in records {
        let entry = branch_sums.entry(record.branch.as_str()).or_insert((0, 0));
        entry.0 += record.total;
        entry.1 += 1;
    }
    let branch_averages = branch_sums
        .into_iter()
        .map(|(branch, (sum, count))| (branch.to_string(), sum as f64 / count as f64))
        .collect();

    debug!(records = records.len(), "Report aggregated");

    Report {
        averages,
        branch_averages,
        rankings,
        errors: diagnostics,
    }
}

/// Top-3 leaderboard for one component. The sort is stable, so equal scores
/// keep their input order and the first-seen record takes the higher rank.
fn top_three(records: &[StudentRecord], scores: &[i64]) -> Vec<RankingEntry> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));

    order
        .iter()
        .take(RANK_LABELS.len())
        .enumerate()
        .map(|(position, &index)| RankingEntry {
            campus_id: records[index].campus_id.clone(),
            score: scores[index],
            rank: RANK_LABELS[position],
        })
        .collect()
}
