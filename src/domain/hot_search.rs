//! Hot-search aggregator
//!
//! Merges administrator-curated keywords (from the `hot_searches`
//! config) with candidates derived from the search log. Admin entries
//! win keyword ties; the merged set is ranked by priority. The merge
//! itself is a pure function of its two inputs.

use crate::contract::{HotSearchEntry, HotSearchSource, KeywordStats};
use crate::domain::repository::SearchLogStore;
use crate::domain::resolver::ConfigService;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Priority assigned to admin entries without an explicit one.
const ADMIN_DEFAULT_PRIORITY: i64 = 100;
/// Priority assigned to algorithm-derived entries.
const ALGORITHM_PRIORITY: i64 = 50;
/// An algorithm keyword with more searches than this displays as hot.
const HOT_COUNT_THRESHOLD: u64 = 10;

pub struct HotSearchService {
    configs: Arc<ConfigService>,
    logs: Arc<dyn SearchLogStore>,
    /// How many algorithm candidates to consider before merging
    candidate_limit: usize,
}

impl HotSearchService {
    pub fn new(
        configs: Arc<ConfigService>,
        logs: Arc<dyn SearchLogStore>,
        candidate_limit: usize,
    ) -> Self {
        Self {
            configs,
            logs,
            candidate_limit,
        }
    }

    /// Combined admin + algorithm hot searches, ranked and truncated.
    pub async fn combined(&self, limit: usize, lookback_days: u32) -> Vec<HotSearchEntry> {
        let resolved = self.configs.get_config("hot_searches").await;
        let admin = parse_admin_entries(&resolved.payload);

        let algorithm = match self.logs.aggregate(lookback_days).await {
            Ok(stats) => rank_candidates(stats, self.candidate_limit),
            Err(err) => {
                warn!(error = %err, "search-log aggregation failed, using admin list only");
                Vec::new()
            }
        };

        merge(admin, algorithm, limit)
    }
}

/// Extract admin entries from the stored payload, skipping malformed
/// items. The store is schema-free, so shape is enforced here.
pub fn parse_admin_entries(payload: &Value) -> Vec<HotSearchEntry> {
    let Some(items) = payload.get("items").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let keyword = item.get("keyword")?.as_str()?;
            if keyword.is_empty() {
                return None;
            }
            Some(HotSearchEntry {
                keyword: keyword.to_string(),
                priority: item
                    .get("priority")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(ADMIN_DEFAULT_PRIORITY),
                is_hot: item.get("isHot").and_then(|v| v.as_bool()).unwrap_or(false),
                source: HotSearchSource::Admin,
            })
        })
        .collect()
}

/// Rank aggregated keywords and take the top candidates.
///
/// score = count * (1 + click_rate) * quality, where quality is 1.0
/// when the keyword ever produced results and 0.5 otherwise.
pub fn rank_candidates(stats: Vec<KeywordStats>, top_n: usize) -> Vec<HotSearchEntry> {
    let mut scored: Vec<(f64, KeywordStats)> = stats
        .into_iter()
        .map(|s| {
            let click_rate = if s.count == 0 {
                0.0
            } else {
                s.clicks as f64 / s.count as f64
            };
            let quality = if s.avg_result_count > 0.0 { 1.0 } else { 0.5 };
            let score = s.count as f64 * (1.0 + click_rate) * quality;
            (score, s)
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(top_n)
        .map(|(_, s)| HotSearchEntry {
            is_hot: s.count > HOT_COUNT_THRESHOLD,
            keyword: s.keyword,
            priority: ALGORITHM_PRIORITY,
            source: HotSearchSource::Algorithm,
        })
        .collect()
}

/// Merge admin and algorithm entries. Admin entries are inserted first
/// and win keyword ties; the result is sorted by priority descending
/// (stable, so admin order survives equal priorities) and truncated.
pub fn merge(
    admin: Vec<HotSearchEntry>,
    algorithm: Vec<HotSearchEntry>,
    limit: usize,
) -> Vec<HotSearchEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<HotSearchEntry> = Vec::with_capacity(admin.len() + algorithm.len());

    for entry in admin.into_iter().chain(algorithm) {
        if seen.insert(entry.keyword.clone()) {
            merged.push(entry);
        }
    }

    merged.sort_by_key(|e| std::cmp::Reverse(e.priority));
    merged.truncate(limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats(keyword: &str, count: u64, clicks: u64, avg: f64) -> KeywordStats {
        KeywordStats {
            keyword: keyword.to_string(),
            count,
            clicks,
            avg_result_count: avg,
        }
    }

    #[test]
    fn test_parse_skips_malformed_items() {
        let payload = json!({
            "items": [
                { "keyword": "双眼皮", "priority": 100, "isHot": true },
                { "priority": 50 },
                { "keyword": "" },
                { "keyword": "隆鼻" },
                "not-an-object"
            ]
        });

        let entries = parse_admin_entries(&payload);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].keyword, "双眼皮");
        assert_eq!(entries[1].keyword, "隆鼻");
        assert_eq!(entries[1].priority, 100);
        assert!(!entries[1].is_hot);
    }

    #[test]
    fn test_parse_tolerates_missing_items() {
        assert!(parse_admin_entries(&json!({})).is_empty());
        assert!(parse_admin_entries(&json!({"items": "nope"})).is_empty());
    }

    #[test]
    fn test_score_rewards_clicks_and_results() {
        // 100 searches with 50% clicks beats 120 searches with none
        let ranked = rank_candidates(
            vec![stats("a", 100, 50, 3.0), stats("b", 120, 0, 2.0)],
            10,
        );
        assert_eq!(ranked[0].keyword, "a"); // 150 vs 120

        // zero result quality halves the score
        let ranked = rank_candidates(vec![stats("c", 100, 0, 0.0), stats("d", 60, 0, 1.0)], 10);
        assert_eq!(ranked[0].keyword, "d"); // 60 vs 50
    }

    #[test]
    fn test_hot_flag_follows_count() {
        let ranked = rank_candidates(vec![stats("a", 11, 0, 1.0), stats("b", 10, 0, 1.0)], 10);
        assert!(ranked[0].is_hot);
        assert!(!ranked[1].is_hot);
    }

    #[test]
    fn test_merge_admin_wins_keyword_tie() {
        let admin = vec![HotSearchEntry {
            keyword: "隆鼻".to_string(),
            priority: 100,
            is_hot: true,
            source: HotSearchSource::Admin,
        }];
        let algorithm = vec![
            HotSearchEntry {
                keyword: "隆鼻".to_string(),
                priority: 50,
                is_hot: false,
                source: HotSearchSource::Algorithm,
            },
            HotSearchEntry {
                keyword: "美白针".to_string(),
                priority: 50,
                is_hot: false,
                source: HotSearchSource::Algorithm,
            },
        ];

        let merged = merge(admin, algorithm, 10);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].keyword, "隆鼻");
        assert_eq!(merged[0].source, HotSearchSource::Admin);
        assert_eq!(merged[1].keyword, "美白针");
        assert_eq!(merged[1].source, HotSearchSource::Algorithm);
    }

    #[test]
    fn test_merge_truncates_by_priority() {
        let admin = vec![
            HotSearchEntry {
                keyword: "a".to_string(),
                priority: 80,
                is_hot: false,
                source: HotSearchSource::Admin,
            },
            HotSearchEntry {
                keyword: "b".to_string(),
                priority: 120,
                is_hot: false,
                source: HotSearchSource::Admin,
            },
        ];
        let algorithm = vec![HotSearchEntry {
            keyword: "c".to_string(),
            priority: 50,
            is_hot: false,
            source: HotSearchSource::Algorithm,
        }];

        let merged = merge(admin, algorithm, 2);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].keyword, "b");
        assert_eq!(merged[1].keyword, "a");
    }
}
