// 👪 Family Canonicalizer - order members, pick the latest chart
//
// Member order: dated charts first, oldest → newest, undated last.
// Ties (same date, or both undated) fall back to ascending numeric id.
// `latest` is the max-date member; among equal maxima the lowest id wins.

use crate::components::{connected_components, Components};
use crate::dates::{compare_observed, format_date, most_recent};
use crate::graph::RelationGraph;
use crate::identifier::numeric_cmp;
use crate::loader::ChartRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

// ============================================================================
// DATE INDEX
// ============================================================================

/// Most recent observation per subject identifier.
///
/// Only subjects get an entry. A subject whose rows never carried a
/// parseable date maps to `None`.
#[derive(Debug, Clone, Default)]
pub struct DateIndex {
    dates: HashMap<String, Option<NaiveDate>>,
}

impl DateIndex {
    pub fn from_records(records: &[ChartRecord]) -> Self {
        let mut index = DateIndex::default();
        for record in records {
            index.observe(&record.wish, record.date);
        }
        index
    }

    /// Fold one observation in, keeping the maximum
    pub fn observe(&mut self, wish: &str, date: Option<NaiveDate>) {
        let entry = self.dates.entry(wish.to_string()).or_insert(None);
        *entry = most_recent(*entry, date);
    }

    /// Date for `wish`, `None` if undated or never a subject
    pub fn date_of(&self, wish: &str) -> Option<NaiveDate> {
        self.dates.get(wish).copied().flatten()
    }

    /// True if `wish` appeared as a subject
    pub fn contains(&self, wish: &str) -> bool {
        self.dates.contains_key(wish)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `YYYY-MM-DD` strings keyed by identifier, `None` for undated
    pub fn to_output(&self) -> BTreeMap<String, Option<String>> {
        self.dates
            .iter()
            .map(|(wish, &date)| (wish.clone(), date.map(format_date)))
            .collect()
    }
}

// ============================================================================
// FAMILY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub members: Vec<String>,
    pub latest: String,
}

impl Family {
    /// Order a component and choose its representative.
    ///
    /// Returns `None` only for an empty component.
    pub fn canonicalize(mut members: Vec<String>, dates: &DateIndex) -> Option<Family> {
        members.sort_by(|a, b| member_order(a, b, dates));

        let mut latest = members.first()?;
        for wish in &members[1..] {
            if compare_observed(dates.date_of(wish), dates.date_of(latest)) == Ordering::Greater {
                latest = wish;
            }
        }

        let latest = latest.clone();
        Some(Family { members, latest })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Dated before undated, then ascending date, then ascending numeric id
fn member_order(a: &str, b: &str, dates: &DateIndex) -> Ordering {
    let (da, db) = (dates.date_of(a), dates.date_of(b));
    let by_date = match (da, db) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => compare_observed(da, db),
    };
    by_date.then_with(|| numeric_cmp(a, b))
}

// ============================================================================
// RELATIONS (emitted document)
// ============================================================================

/// Relations - families, id → family index, id → latest date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    pub families: Vec<Family>,
    pub wish_to_family: BTreeMap<String, usize>,
    pub dates: BTreeMap<String, Option<String>>,
}

impl Relations {
    /// Family containing `wish`
    pub fn family_of(&self, wish: &str) -> Option<&Family> {
        self.wish_to_family
            .get(wish)
            .and_then(|&idx| self.families.get(idx))
    }

    /// Representative chart for the family containing `wish`
    pub fn latest_for(&self, wish: &str) -> Option<&str> {
        self.family_of(wish).map(|f| f.latest.as_str())
    }

    pub fn summary(&self) -> RelationsSummary {
        let charts_dated = self.dates.values().filter(|d| d.is_some()).count();
        RelationsSummary {
            families: self.families.len(),
            charts: self.dates.len(),
            charts_dated,
            charts_undated: self.dates.len() - charts_dated,
            multi_member_families: self.families.iter().filter(|f| f.len() > 1).count(),
            largest_family: self.families.iter().map(Family::len).max().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationsSummary {
    pub families: usize,
    /// Distinct subject identifiers
    pub charts: usize,
    pub charts_dated: usize,
    pub charts_undated: usize,
    pub multi_member_families: usize,
    pub largest_family: usize,
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Graph → components → date index → canonical families
pub fn resolve(records: &[ChartRecord]) -> Relations {
    let graph = RelationGraph::from_records(records);
    let components = connected_components(&graph);
    let dates = DateIndex::from_records(records);

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        components = components.len(),
        "resolved relation graph"
    );

    build_relations(components, &dates)
}

fn build_relations(components: Components, dates: &DateIndex) -> Relations {
    let Components { groups, index } = components;

    // Components are never empty, so family i is component i
    let families: Vec<Family> = groups
        .into_iter()
        .filter_map(|group| Family::canonicalize(group, dates))
        .collect();

    Relations {
        families,
        wish_to_family: index.into_iter().collect(),
        dates: dates.to_output(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_date_index_keeps_maximum() {
        let records = vec![
            ChartRecord::new("10001", ymd(2023, 5, 1)),
            ChartRecord::new("10001", None),
            ChartRecord::new("10001", ymd(2024, 1, 5)),
            ChartRecord::new("10001", ymd(2022, 12, 31)),
        ];
        let index = DateIndex::from_records(&records);

        assert_eq!(index.date_of("10001"), ymd(2024, 1, 5));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_date_index_undated_subject_is_null() {
        let index = DateIndex::from_records(&[ChartRecord::new("10001", None).with_reference("10002")]);

        assert!(index.contains("10001"));
        assert!(!index.contains("10002"));
        assert_eq!(index.to_output().get("10001"), Some(&None));
    }

    #[test]
    fn test_canonicalize_orders_dated_then_undated() {
        let mut index = DateIndex::default();
        index.observe("30000", ymd(2024, 3, 1));
        index.observe("20000", None);
        index.observe("10000", ymd(2022, 1, 1));

        let members = vec!["20000".to_string(), "30000".to_string(), "10000".to_string(), "40000".to_string()];
        let family = Family::canonicalize(members, &index).unwrap();

        assert_eq!(family.members, vec!["10000", "30000", "20000", "40000"]);
        assert_eq!(family.latest, "30000");
    }

    #[test]
    fn test_canonicalize_tie_break_numeric() {
        let mut index = DateIndex::default();
        index.observe("200000", ymd(2024, 1, 1));
        index.observe("99999", ymd(2024, 1, 1));

        let members = vec!["200000".to_string(), "99999".to_string()];
        let family = Family::canonicalize(members, &index).unwrap();

        assert_eq!(family.members, vec!["99999", "200000"]);
        assert_eq!(family.latest, "99999");
    }

    #[test]
    fn test_canonicalize_all_undated() {
        let index = DateIndex::default();
        let family = Family::canonicalize(vec!["50000".to_string(), "40000".to_string()], &index).unwrap();

        assert_eq!(family.members, vec!["40000", "50000"]);
        assert_eq!(family.latest, "40000");
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(Family::canonicalize(Vec::new(), &DateIndex::default()).is_none());
    }

    #[test]
    fn test_resolve_two_row_family() {
        let records = vec![
            ChartRecord::new("10001", None).with_reference("10002"),
            ChartRecord::new("10002", None),
        ];
        let relations = resolve(&records);

        assert_eq!(relations.families.len(), 1);
        let members: BTreeSet<&str> = relations.families[0].members.iter().map(String::as_str).collect();
        assert_eq!(members, BTreeSet::from(["10001", "10002"]));
        assert_eq!(relations.wish_to_family.get("10001"), Some(&0));
        assert_eq!(relations.wish_to_family.get("10002"), Some(&0));
    }

    #[test]
    fn test_wish_to_family_points_at_own_family() {
        let records = vec![
            ChartRecord::new("10001", ymd(2024, 1, 5)).with_reference("10002"),
            ChartRecord::new("20001", None),
            ChartRecord::new("30001", ymd(2020, 1, 1)).with_reference("30002").with_reference("10002"),
            ChartRecord::new("40001", None).with_reference("40002"),
        ];
        let relations = resolve(&records);

        assert_eq!(relations.families.len(), 3);
        let total: usize = relations.families.iter().map(Family::len).sum();
        assert_eq!(relations.wish_to_family.len(), total);
        for (idx, family) in relations.families.iter().enumerate() {
            for wish in &family.members {
                assert_eq!(relations.wish_to_family.get(wish), Some(&idx));
            }
        }
    }

    #[test]
    fn test_resolve_symmetry_regardless_of_direction() {
        let records = vec![
            ChartRecord::new("10001", None),
            ChartRecord::new("10002", None).with_reference("10001"),
        ];
        let relations = resolve(&records);

        assert_eq!(relations.family_of("10001"), relations.family_of("10002"));
        assert_eq!(relations.families.len(), 1);
    }

    #[test]
    fn test_resolve_reference_only_ids_have_family_but_no_date() {
        let relations = resolve(&[ChartRecord::new("10001", ymd(2024, 1, 5)).with_reference("10002")]);

        assert!(relations.wish_to_family.contains_key("10002"));
        assert!(!relations.dates.contains_key("10002"));
        assert_eq!(relations.dates.get("10001"), Some(&Some("2024-01-05".to_string())));
        assert_eq!(relations.latest_for("10002"), Some("10001"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let records = vec![
            ChartRecord::new("10001", ymd(2020, 1, 1)).with_reference("10003").with_reference("10002"),
            ChartRecord::new("20001", None),
            ChartRecord::new("10002", ymd(2020, 1, 1)),
        ];

        assert_eq!(resolve(&records), resolve(&records));
    }

    #[test]
    fn test_summary() {
        let records = vec![
            ChartRecord::new("10001", ymd(2024, 1, 5)).with_reference("10002").with_reference("10003"),
            ChartRecord::new("10002", None),
            ChartRecord::new("20001", ymd(2023, 1, 1)),
        ];
        let summary = resolve(&records).summary();

        assert_eq!(summary.families, 2);
        assert_eq!(summary.charts, 3);
        assert_eq!(summary.charts_dated, 2);
        assert_eq!(summary.charts_undated, 1);
        assert_eq!(summary.multi_member_families, 1);
        assert_eq!(summary.largest_family, 3);
    }

    #[test]
    fn test_unknown_id_lookups() {
        let relations = resolve(&[ChartRecord::new("10001", None)]);
        assert!(relations.family_of("99999").is_none());
        assert!(relations.latest_for("99999").is_none());
    }
}
