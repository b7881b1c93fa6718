//! Leaderboard built from stored evaluations.

use std::collections::HashMap;

use serde::Serialize;

use crate::evaluator::ANONYMOUS_USER;
use crate::store::EvaluationRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub username: String,
    /// Average candidate score, one decimal.
    pub score: f64,
}

struct Tally<'a> {
    name: &'a str,
    total: f64,
    count: u32,
}

/// Averages each user's candidate scores, sorted best first.
///
/// Anonymous records and records without a user id are ignored. A failed
/// evaluation still counts, with a score of zero. Users are grouped by id and
/// shown under the first display name seen for them. `filter` keeps entries
/// whose name contains it, ignoring case. Ties keep first-seen order.
pub fn aggregate(records: &[EvaluationRecord], filter: Option<&str>) -> Vec<RankingEntry> {
    let mut order: Vec<Tally<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let user_id = record.result.user_id.trim();
        if user_id.is_empty() || user_id == ANONYMOUS_USER {
            continue;
        }
        let slot = *index.entry(user_id).or_insert_with(|| {
            order.push(Tally {
                name: record.display_name(),
                total: 0.0,
                count: 0,
            });
            order.len() - 1
        });
        let tally = &mut order[slot];
        tally.total += record.result.evaluation.candidate_score();
        tally.count += 1;
    }

    let mut entries: Vec<RankingEntry> = order
        .into_iter()
        .map(|tally| RankingEntry {
            username: tally.name.to_string(),
            score: round_one_decimal(tally.total / f64::from(tally.count)),
        })
        .collect();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        Some(needle) => {
            let needle = needle.to_lowercase();
            entries.retain(|entry| entry.username.to_lowercase().contains(&needle));
            entries
        }
        None => entries,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
