//! View derivation over a lead snapshot
//!
//! Everything here is pure and cheap enough to recompute on every store or
//! criteria change.

use crate::types::{Lead, LeadStatus};
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Status selector of the lead list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status
    #[default]
    All,
    /// A single status
    Only(LeadStatus),
}

impl StatusFilter {
    /// Whether a lead in `status` passes this filter
    #[must_use]
    pub fn accepts(self, status: LeadStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl From<LeadStatus> for StatusFilter {
    fn from(status: LeadStatus) -> Self {
        Self::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Search text plus status selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against name and phone
    pub search_term: String,
    /// Status selector
    pub status: StatusFilter,
}

impl FilterCriteria {
    /// Criteria from a search term and status selector
    pub fn new(search_term: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search_term: search_term.into(),
            status,
        }
    }

    /// Whether `lead` passes both the status selector and the search term
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.accepts(lead.status) && matches_search(lead, &self.search_term.to_lowercase())
    }
}

fn matches_search(lead: &Lead, needle: &str) -> bool {
    needle.is_empty()
        || lead.name.to_lowercase().contains(needle)
        || lead.phone.to_lowercase().contains(needle)
}

/// Leads passing the status selector whose name or phone contains
/// `search_term`, case-insensitively, in source order
#[must_use]
pub fn filter(leads: &[Lead], search_term: &str, status_filter: StatusFilter) -> Vec<Lead> {
    let needle = search_term.to_lowercase();
    leads
        .iter()
        .filter(|lead| status_filter.accepts(lead.status) && matches_search(lead, &needle))
        .cloned()
        .collect()
}

/// Lead counts per status plus the total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    counts: [usize; 5],
    /// Number of leads counted
    pub total: usize,
}

impl Metrics {
    /// Count of leads in `status`
    #[must_use]
    pub fn count(&self, status: LeadStatus) -> usize {
        self.counts.get(status.index()).copied().unwrap_or_default()
    }

    /// `(status, count)` pairs in display order, empty buckets included
    pub fn iter(&self) -> impl Iterator<Item = (LeadStatus, usize)> + '_ {
        LeadStatus::ALL
            .into_iter()
            .map(move |status| (status, self.count(status)))
    }
}

impl Serialize for Metrics {
    /// `{"New": 1, "Outreach Sent": 0, ..., "total": 2}`
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(LeadStatus::ALL.len() + 1))?;
        for (status, count) in self.iter() {
            map.serialize_entry(status.label(), &count)?;
        }
        map.serialize_entry("total", &self.total)?;
        map.end()
    }
}

/// Per-status counts over `leads`, all five buckets present
#[must_use]
pub fn metrics(leads: &[Lead]) -> Metrics {
    let mut metrics = Metrics {
        total: leads.len(),
        ..Metrics::default()
    };
    for lead in leads {
        if let Some(slot) = metrics.counts.get_mut(lead.status.index()) {
            *slot += 1;
        }
    }
    metrics
}

/// One bar of the status chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartBucket {
    /// Status of the bar
    pub status: LeadStatus,
    /// Leads currently in that status
    pub total: usize,
}

/// One bucket per status in [`LeadStatus::ALL`] order, independent of the
/// order of `leads`
#[must_use]
pub fn chart_data(leads: &[Lead]) -> Vec<ChartBucket> {
    metrics(leads)
        .iter()
        .map(|(status, total)| ChartBucket { status, total })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn ana_and_bob() -> Vec<Lead> {
        vec![
            Lead::new("1", "Ana", "", LeadStatus::New),
            Lead::new("2", "Bob", "", LeadStatus::Scheduled),
        ]
    }

    fn pipeline() -> Vec<Lead> {
        vec![
            Lead::new("1", "Ana Silva", "(11) 98765-4321", LeadStatus::New),
            Lead::new("2", "Bruno Costa", "(21) 91234-5678", LeadStatus::FollowUp),
            Lead::new("3", "Carla Dias", "(11) 90000-1111", LeadStatus::New),
            Lead::new("4", "Diego Ramos", "(31) 95555-2222", LeadStatus::Disqualified),
        ]
    }

    fn ids(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|lead| lead.id.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything_in_order() {
        let leads = pipeline();
        assert_eq!(filter(&leads, "", StatusFilter::All), leads);
    }

    #[rstest]
    #[case("ana", StatusFilter::All, vec!["1"])]
    #[case("ANA SILVA", StatusFilter::All, vec!["1"])]
    #[case("(11)", StatusFilter::All, vec!["1", "3"])]
    #[case("(11)", StatusFilter::Only(LeadStatus::New), vec!["1", "3"])]
    #[case("", StatusFilter::Only(LeadStatus::New), vec!["1", "3"])]
    #[case("a", StatusFilter::Only(LeadStatus::FollowUp), vec!["2"])]
    #[case("", StatusFilter::Only(LeadStatus::Scheduled), vec![])]
    #[case("zzz", StatusFilter::All, vec![])]
    fn test_filter_cases(
        #[case] term: &str,
        #[case] status: StatusFilter,
        #[case] expected: Vec<&str>,
    ) {
        let leads = pipeline();
        assert_eq!(ids(&filter(&leads, term, status)), expected);
    }

    #[test]
    fn test_scenario_ana_and_bob() {
        let store = ana_and_bob();

        assert_eq!(ids(&filter(&store, "an", StatusFilter::All)), vec!["1"]);

        let counts = metrics(&store);
        assert_eq!(counts.count(LeadStatus::New), 1);
        assert_eq!(counts.count(LeadStatus::OutreachSent), 0);
        assert_eq!(counts.count(LeadStatus::FollowUp), 0);
        assert_eq!(counts.count(LeadStatus::Disqualified), 0);
        assert_eq!(counts.count(LeadStatus::Scheduled), 1);
        assert_eq!(counts.total, 2);
    }

    #[test]
    fn test_metrics_json_shape() {
        let value = serde_json::to_value(metrics(&ana_and_bob())).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "New": 1,
                "Outreach Sent": 0,
                "Follow Up": 0,
                "Disqualified": 0,
                "Scheduled": 1,
                "total": 2
            })
        );
    }

    #[test]
    fn test_chart_data_empty_store() {
        let buckets = chart_data(&[]);

        assert_eq!(buckets.len(), 5);
        assert_eq!(
            buckets.iter().map(|b| b.status).collect::<Vec<_>>(),
            LeadStatus::ALL.to_vec()
        );
        assert!(buckets.iter().all(|b| b.total == 0));
        assert_eq!(metrics(&[]), Metrics::default());
    }

    #[test]
    fn test_chart_data_ignores_store_order() {
        let mut leads = pipeline();
        let forward = chart_data(&leads);
        leads.reverse();

        assert_eq!(chart_data(&leads), forward);
        assert_eq!(forward[0], ChartBucket { status: LeadStatus::New, total: 2 });
        assert_eq!(forward[2], ChartBucket { status: LeadStatus::FollowUp, total: 1 });
        assert_eq!(forward[3], ChartBucket { status: LeadStatus::Disqualified, total: 1 });
    }

    #[rstest]
    #[case("all", StatusFilter::All)]
    #[case("ALL", StatusFilter::All)]
    #[case("Novo", StatusFilter::Only(LeadStatus::New))]
    #[case("Outreach Sent", StatusFilter::Only(LeadStatus::OutreachSent))]
    fn test_status_filter_parsing(#[case] input: &str, #[case] expected: StatusFilter) {
        assert_eq!(input.parse::<StatusFilter>().unwrap(), expected);
    }

    #[test]
    fn test_criteria_matches_agrees_with_filter() {
        let leads = pipeline();
        let criteria = FilterCriteria::new("COSTA", StatusFilter::All);

        let matched: Vec<Lead> = leads.iter().filter(|l| criteria.matches(l)).cloned().collect();
        assert_eq!(matched, filter(&leads, "COSTA", StatusFilter::All));
        assert_eq!(ids(&matched), vec!["2"]);
    }

    fn any_status() -> impl Strategy<Value = LeadStatus> {
        prop::sample::select(LeadStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_metrics_sum_to_total(statuses in prop::collection::vec(any_status(), 0..60)) {
            let leads: Vec<Lead> = statuses
                .iter()
                .enumerate()
                .map(|(i, status)| Lead::new(i.to_string(), "", "", *status))
                .collect();

            let counts = metrics(&leads);
            prop_assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), leads.len());
            prop_assert_eq!(counts.total, leads.len());
            prop_assert_eq!(chart_data(&leads).len(), 5);
        }

        #[test]
        fn test_filter_keeps_a_subsequence(
            statuses in prop::collection::vec(any_status(), 0..30),
            term in "[a-c]{0,2}",
        ) {
            let leads: Vec<Lead> = statuses
                .iter()
                .enumerate()
                .map(|(i, status)| Lead::new(i.to_string(), format!("abc{i}"), "", *status))
                .collect();

            let filtered = filter(&leads, &term, StatusFilter::All);
            let mut source = leads.iter();
            for lead in &filtered {
                prop_assert!(source.any(|candidate| candidate == lead));
            }
        }
    }
}
