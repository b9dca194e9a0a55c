use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a poll. The only legal transitions are `Draft -> Active` and
/// `Active -> Ended`; `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Draft,
    Active,
    Ended,
}

impl PollStatus {
    pub fn can_transition(self, to: PollStatus) -> bool {
        matches!(
            (self, to),
            (PollStatus::Draft, PollStatus::Active) | (PollStatus::Active, PollStatus::Ended)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub label: String,
    pub votes: i64,
    /// Derived share of `total_votes`, one-decimal rounded. 0.0 for an empty poll.
    pub percentage: f64,
}

impl PollOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, votes: i64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            votes,
            percentage: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: PollStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub options: Vec<PollOption>,
    pub total_votes: i64,
    pub created_by: String,
}

impl Poll {
    /// A fresh poll in `Draft` with zeroed counts. Option ids are assigned
    /// positionally (`opt1`, `opt2`, ...).
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        labels: Vec<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let options = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| PollOption::new(format!("opt{}", i + 1), label, 0))
            .collect();
        Poll {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            status: PollStatus::Draft,
            start_date,
            end_date,
            options,
            total_votes: 0,
            created_by: created_by.into(),
        }
    }

    /// The fixed three-way reaction poll attached to legislation items.
    pub fn reaction(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        support: i64,
        oppose: i64,
        neutral: i64,
        created_by: impl Into<String>,
    ) -> Self {
        let mut poll = Poll {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            status: PollStatus::Active,
            start_date,
            end_date,
            options: vec![
                PollOption::new("support", "Support", support),
                PollOption::new("oppose", "Oppose", oppose),
                PollOption::new("neutral", "Neutral", neutral),
            ],
            total_votes: support + oppose + neutral,
            created_by: created_by.into(),
        };
        crate::core::tally::recompute_percentages(&mut poll);
        poll
    }

    pub fn option(&self, option_id: &str) -> Option<&PollOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollCreate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PollSort {
    #[default]
    Newest,
    EndingSoon,
    MostVotes,
}

#[derive(Debug, Default)]
pub struct PollQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<PollStatus>,
    pub sort: PollSort,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(PollStatus::Draft.can_transition(PollStatus::Active));
        assert!(PollStatus::Active.can_transition(PollStatus::Ended));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!PollStatus::Draft.can_transition(PollStatus::Ended));
        assert!(!PollStatus::Active.can_transition(PollStatus::Draft));
        assert!(!PollStatus::Ended.can_transition(PollStatus::Active));
        assert!(!PollStatus::Ended.can_transition(PollStatus::Draft));
        assert!(!PollStatus::Draft.can_transition(PollStatus::Draft));
        assert!(!PollStatus::Active.can_transition(PollStatus::Active));
        assert!(!PollStatus::Ended.can_transition(PollStatus::Ended));
    }

    #[test]
    fn test_reaction_poll_counts() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let poll = Poll::reaction("Bike Lane Expansion", "", "Transportation", start, end, 135, 87, 29, "seed");
        assert_eq!(poll.total_votes, 251);
        assert_eq!(poll.options.len(), 3);
        let sum: f64 = poll.options.iter().map(|o| o.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.5);
    }
}
