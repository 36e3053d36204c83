//! Vote aggregation.
//!
//! Pure functions from a snapshot of votes plus the roster to the revealed
//! view and its statistics. Votes are loosely typed: any value that parses
//! as a finite number feeds min/max/average, whatever the session's scale.
//! Every value, numeric or not, lands in the histogram.

use std::collections::{BTreeMap, HashMap};

use crate::domain::foundation::ParticipantId;

use super::{Participant, RevealedVote, RevealedVotes, VoteStats, VoteStatus};

/// Builds the per-participant revealed view and the vote statistics.
///
/// `roster` is emitted in the order given; participants without a vote get
/// an empty value.
pub fn reveal<'a>(
    votes: &HashMap<ParticipantId, String>,
    roster: impl IntoIterator<Item = &'a Participant>,
) -> RevealedVotes {
    let revealed = roster
        .into_iter()
        .map(|p| RevealedVote {
            participant_id: p.id().clone(),
            name: p.name().to_string(),
            is_host: p.is_host(),
            value: votes.get(p.id()).cloned().unwrap_or_default(),
        })
        .collect();

    RevealedVotes {
        votes: revealed,
        stats: compute_stats(votes.values().map(String::as_str)),
    }
}

/// Who has voted so far, without the values.
pub fn voting_status<'a>(
    votes: &HashMap<ParticipantId, String>,
    roster: impl IntoIterator<Item = &'a Participant>,
) -> Vec<VoteStatus> {
    roster
        .into_iter()
        .map(|p| VoteStatus {
            participant_id: p.id().clone(),
            name: p.name().to_string(),
            is_host: p.is_host(),
            has_voted: votes.contains_key(p.id()),
        })
        .collect()
}

/// Computes statistics over raw vote values.
pub fn compute_stats<'a>(values: impl IntoIterator<Item = &'a str>) -> VoteStats {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut numeric = Vec::new();
    let mut total_votes = 0;

    for value in values {
        total_votes += 1;
        *counts.entry(value.to_string()).or_insert(0) += 1;
        if let Some(n) = parse_numeric(value) {
            numeric.push(n);
        }
    }

    if numeric.is_empty() {
        return VoteStats {
            min: None,
            max: None,
            average: None,
            counts,
            total_votes,
        };
    }

    let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let len = numeric.len() as f64;
    let sum: f64 = numeric.iter().sum();
    let mean = if sum.is_finite() {
        sum / len
    } else {
        // Values near f64::MAX overflow the plain sum.
        numeric.iter().map(|n| n / len).sum()
    };

    VoteStats {
        min: Some(min.to_string()),
        max: Some(max.to_string()),
        average: Some(round_to_cents(mean)),
        counts,
        total_votes,
    }
}

/// Strict numeric parse: the whole string must be a finite number.
fn parse_numeric(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats_of(values: &[&str]) -> VoteStats {
        compute_stats(values.iter().copied())
    }

    #[test]
    fn two_numeric_votes_give_extrema_and_average() {
        let stats = stats_of(&["5", "8"]);
        assert_eq!(stats.min.as_deref(), Some("5"));
        assert_eq!(stats.max.as_deref(), Some("8"));
        assert_eq!(stats.average, Some(6.5));
        assert_eq!(stats.counts.get("5"), Some(&1));
        assert_eq!(stats.counts.get("8"), Some(&1));
        assert_eq!(stats.total_votes, 2);
    }

    #[test]
    fn all_symbolic_votes_give_no_numeric_stats() {
        let stats = stats_of(&["?", "?", "?"]);
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
        assert_eq!(stats.average, None);
        assert_eq!(stats.counts.get("?"), Some(&3));
        assert_eq!(stats.total_votes, 3);
    }

    #[test]
    fn empty_votes_give_empty_stats() {
        assert_eq!(stats_of(&[]), VoteStats::default());
    }

    #[test]
    fn mixed_votes_count_everything_but_average_numbers_only() {
        let stats = stats_of(&["3", "☕", "5", "?", "XL"]);
        assert_eq!(stats.min.as_deref(), Some("3"));
        assert_eq!(stats.max.as_deref(), Some("5"));
        assert_eq!(stats.average, Some(4.0));
        assert_eq!(stats.counts.len(), 5);
        assert_eq!(stats.total_votes, 5);
    }

    #[test]
    fn numeric_rendering_is_canonical() {
        let stats = stats_of(&["5.0", "0.5"]);
        assert_eq!(stats.max.as_deref(), Some("5"));
        assert_eq!(stats.min.as_deref(), Some("0.5"));
        assert_eq!(stats.counts.get("5.0"), Some(&1));
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let stats = stats_of(&["1", "2", "2"]);
        assert_eq!(stats.average, Some(1.67));
    }

    #[test]
    fn non_finite_and_padded_values_are_not_numeric() {
        let stats = stats_of(&["inf", "NaN", " 5"]);
        assert_eq!(stats.average, None);
        assert_eq!(stats.total_votes, 3);
    }

    #[test]
    fn huge_votes_keep_a_finite_average() {
        let stats = stats_of(&["1e308", "1e308"]);
        assert_eq!(stats.min.as_deref(), stats.max.as_deref());
        assert_eq!(stats.average, Some(1e308));

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["average"].is_number());
    }

    #[test]
    fn opposite_extremes_average_to_zero() {
        let stats = stats_of(&["-1.7e308", "1.7e308"]);
        assert_eq!(stats.average, Some(0.0));
    }

    #[test]
    fn reveal_fills_empty_value_for_non_voters() {
        let host = Participant::host("Host").unwrap();
        let guest = Participant::guest("Guest").unwrap();
        let mut votes = HashMap::new();
        votes.insert(host.id().clone(), "13".to_string());

        let revealed = reveal(&votes, [&host, &guest]);

        assert_eq!(revealed.votes.len(), 2);
        assert_eq!(revealed.votes[0].value, "13");
        assert!(revealed.votes[0].is_host);
        assert_eq!(revealed.votes[1].value, "");
        assert_eq!(revealed.stats.total_votes, 1);
    }

    #[test]
    fn voting_status_hides_values() {
        let host = Participant::host("Host").unwrap();
        let guest = Participant::guest("Guest").unwrap();
        let mut votes = HashMap::new();
        votes.insert(guest.id().clone(), "8".to_string());

        let status = voting_status(&votes, [&host, &guest]);

        assert!(!status[0].has_voted);
        assert!(status[1].has_voted);
        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("\"8\""));
    }

    proptest! {
        #[test]
        fn total_always_matches_vote_count(values in prop::collection::vec("[0-9?XSML]{1,3}", 0..20)) {
            let stats = compute_stats(values.iter().map(String::as_str));
            prop_assert_eq!(stats.total_votes, values.len());
            prop_assert_eq!(stats.counts.values().sum::<usize>(), values.len());
        }

        #[test]
        fn average_lies_between_extrema(values in prop::collection::vec(0u32..1000, 1..20)) {
            let raw: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            let stats = compute_stats(raw.iter().map(String::as_str));
            let min: f64 = stats.min.unwrap().parse().unwrap();
            let max: f64 = stats.max.unwrap().parse().unwrap();
            let avg = stats.average.unwrap();
            prop_assert!(min - 0.005 <= avg && avg <= max + 0.005);
        }
    }
}
