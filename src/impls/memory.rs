use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::core::models::{
    ballot::Ballot,
    common::Pagination,
    poll::{Poll, PollOption, PollQuery, PollSort, PollStatus},
    voter::Voter,
};
use crate::core::ports::repository::{BallotCommon, Manager, PollCommon, RosterCommon, Store, TxStore};
use crate::core::tally;
use crate::error::Error;

#[derive(Debug, Default, Clone)]
pub struct State {
    polls: HashMap<String, Poll>,
    ballots: HashMap<(String, String), Ballot>,
    voters: Vec<Voter>,
}

/// In-memory repository. The whole state sits behind one `RwLock`; every
/// store takes the write guard, so a cast-ballot read-modify-write cannot
/// interleave with another voter's.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    state: Arc<RwLock<State>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository preloaded with the demo polls and voter pool.
    pub fn seeded() -> Self {
        MemoryRepository {
            state: Arc::new(RwLock::new(seed_state())),
        }
    }
}

impl Manager for MemoryRepository {
    type Store = MemoryStore;
    type Tx = MemoryStore;

    async fn db(&self) -> Result<MemoryStore, Error> {
        self.tx().await
    }

    async fn tx(&self) -> Result<MemoryStore, Error> {
        let guard = self.state.clone().write_owned().await;
        let snapshot = guard.clone();
        Ok(MemoryStore { guard, snapshot })
    }
}

pub struct MemoryStore {
    guard: OwnedRwLockWriteGuard<State>,
    snapshot: State,
}

fn matches(poll: &Poll, query: &PollQuery) -> bool {
    if let Some(term) = &query.search {
        let term = term.to_lowercase();
        if !poll.title.to_lowercase().contains(&term) && !poll.description.to_lowercase().contains(&term) {
            return false;
        }
    }
    if let Some(category) = &query.category {
        if &poll.category != category {
            return false;
        }
    }
    if let Some(status) = query.status {
        if poll.status != status {
            return false;
        }
    }
    true
}

impl PollCommon for MemoryStore {
    async fn insert(&mut self, poll: Poll) -> Result<String, Error> {
        let id = poll.id.clone();
        self.guard.polls.insert(id.clone(), poll);
        Ok(id)
    }

    async fn get(&mut self, id: &str) -> Result<Poll, Error> {
        self.guard.polls.get(id).cloned().ok_or_else(|| Error::PollNotFound(id.to_owned()))
    }

    async fn save(&mut self, poll: Poll) -> Result<(), Error> {
        if !self.guard.polls.contains_key(&poll.id) {
            return Err(Error::PollNotFound(poll.id));
        }
        self.guard.polls.insert(poll.id.clone(), poll);
        Ok(())
    }

    async fn query(&mut self, query: &PollQuery, pagination: Option<Pagination>) -> Result<Vec<Poll>, Error> {
        let polls: Vec<Poll> = self
            .guard
            .polls
            .values()
            .filter(|p| matches(p, query))
            .cloned()
            .sorted_by(|a, b| match query.sort {
                PollSort::Newest => b.end_date.cmp(&a.end_date),
                PollSort::EndingSoon => a.end_date.cmp(&b.end_date),
                PollSort::MostVotes => b.total_votes.cmp(&a.total_votes),
            })
            .collect();
        match pagination {
            Some(p) => Ok(p.apply(polls)),
            None => Ok(polls),
        }
    }

    async fn count(&mut self, query: &PollQuery) -> Result<i64, Error> {
        Ok(self.guard.polls.values().filter(|p| matches(p, query)).count() as i64)
    }
}

impl BallotCommon for MemoryStore {
    async fn get(&mut self, poll_id: &str, user_id: &str) -> Result<Option<Ballot>, Error> {
        Ok(self.guard.ballots.get(&(poll_id.to_owned(), user_id.to_owned())).cloned())
    }

    async fn upsert(&mut self, ballot: Ballot) -> Result<(), Error> {
        self.guard.ballots.insert((ballot.poll_id.clone(), ballot.user_id.clone()), ballot);
        Ok(())
    }
}

impl RosterCommon for MemoryStore {
    async fn voter_pool(&mut self) -> Result<Vec<Voter>, Error> {
        Ok(self.guard.voters.clone())
    }
}

impl Store for MemoryStore {}

impl TxStore for MemoryStore {
    async fn commit(self) -> Result<(), Error> {
        Ok(())
    }

    async fn rollback(mut self) -> Result<(), Error> {
        *self.guard = self.snapshot;
        Ok(())
    }
}

fn seed_poll(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    status: PollStatus,
    (sy, sm, sd): (i32, u32, u32),
    (ey, em, ed): (i32, u32, u32),
    options: &[(&str, &str, i64)],
) -> Poll {
    let mut poll = Poll {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        category: category.to_owned(),
        status,
        start_date: chrono::NaiveDate::from_ymd_opt(sy, sm, sd).expect("valid seed date"),
        end_date: chrono::NaiveDate::from_ymd_opt(ey, em, ed).expect("valid seed date"),
        options: options.iter().map(|(id, label, votes)| PollOption::new(*id, *label, *votes)).collect(),
        total_votes: options.iter().map(|(_, _, votes)| votes).sum(),
        created_by: "admin".to_owned(),
    };
    tally::recompute_percentages(&mut poll);
    poll
}

fn seed_state() -> State {
    let polls = vec![
        seed_poll(
            "poll-001",
            "Community Center Improvement",
            "Should the city renovate the existing community center or build a new facility?",
            "Infrastructure",
            PollStatus::Active,
            (2025, 3, 1),
            (2025, 4, 15),
            &[("opt1", "Renovate existing center", 145), ("opt2", "Build new facility", 111)],
        ),
        seed_poll(
            "poll-002",
            "Park Amenities Selection",
            "Which amenity should the new riverside park include first?",
            "Infrastructure",
            PollStatus::Active,
            (2025, 3, 10),
            (2025, 4, 10),
            &[
                ("opt1", "Playground equipment", 72),
                ("opt2", "Walking trails", 95),
                ("opt3", "Sports courts", 22),
            ],
        ),
        seed_poll(
            "poll-003",
            "Community Events Priority",
            "Which kinds of events should the city prioritize for next year's calendar?",
            "Culture",
            PollStatus::Ended,
            (2025, 2, 1),
            (2025, 3, 1),
            &[
                ("opt1", "Cultural festivals", 187),
                ("opt2", "Educational workshops", 98),
                ("opt3", "Family activities", 147),
            ],
        ),
        seed_poll(
            "poll-004",
            "Bike Lane Expansion Project",
            "Do you support the proposal to expand dedicated bike lanes on major roads throughout the downtown area?",
            "Transportation",
            PollStatus::Active,
            (2025, 4, 1),
            (2025, 5, 25),
            &[("support", "Support", 135), ("oppose", "Oppose", 87), ("neutral", "Neutral", 29)],
        ),
        seed_poll(
            "poll-005",
            "Weekend Farmers Market Proposal",
            "Should we establish a weekly farmers market in the central plaza on weekends?",
            "Economic Development",
            PollStatus::Active,
            (2025, 4, 1),
            (2025, 5, 10),
            &[("support", "Support", 203), ("oppose", "Oppose", 18), ("neutral", "Neutral", 12)],
        ),
    ];
    let voters = [
        "Maria Alvarez",
        "James Chen",
        "Aisha Patel",
        "Robert Okafor",
        "Elena Petrova",
        "Daniel Kim",
        "Sofia Rossi",
        "Marcus Johnson",
        "Priya Sharma",
        "Thomas Nguyen",
        "Hannah Weber",
        "Carlos Mendez",
        "Grace Liu",
        "Samuel Adeyemi",
        "Ingrid Larsen",
        "Omar Haddad",
        "Julia Kowalski",
        "David Brooks",
        "Amara Diallo",
        "Peter Novak",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| Voter::new(format!("voter-{:03}", i + 1), *name))
    .collect();
    State {
        polls: polls.into_iter().map(|p| (p.id.clone(), p)).collect(),
        ballots: HashMap::new(),
        voters,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_seeded_polls_are_consistent() {
        let repo = MemoryRepository::seeded();
        let mut db = repo.db().await.unwrap();
        let polls = PollCommon::query(&mut db, &PollQuery::default(), None).await.unwrap();
        assert!(!polls.is_empty());
        for poll in polls {
            let sum: i64 = poll.options.iter().map(|o| o.votes).sum();
            assert_eq!(poll.total_votes, sum);
        }
    }

    #[tokio::test]
    async fn test_rollback_restores_state() {
        let repo = MemoryRepository::seeded();
        let mut tx = repo.tx().await.unwrap();
        let mut poll = PollCommon::get(&mut tx, "poll-001").await.unwrap();
        poll.total_votes = 9999;
        PollCommon::save(&mut tx, poll).await.unwrap();
        tx.rollback().await.unwrap();

        let mut db = repo.db().await.unwrap();
        let poll = PollCommon::get(&mut db, "poll-001").await.unwrap();
        assert_eq!(poll.total_votes, 256);
    }

    #[tokio::test]
    async fn test_save_of_unknown_poll_fails() {
        let repo = MemoryRepository::new();
        let mut db = repo.db().await.unwrap();
        let poll = seed_poll("ghost", "t", "d", "c", PollStatus::Draft, (2025, 1, 1), (2025, 2, 1), &[("opt1", "a", 0)]);
        let err = PollCommon::save(&mut db, poll).await.unwrap_err();
        assert!(matches!(err, Error::PollNotFound(_)));
    }

    #[tokio::test]
    async fn test_category_filter() {
        let repo = MemoryRepository::seeded();
        let mut db = repo.db().await.unwrap();
        let query = PollQuery {
            category: Some("Transportation".into()),
            ..Default::default()
        };
        let polls = PollCommon::query(&mut db, &query, None).await.unwrap();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].id, "poll-004");
    }

    #[tokio::test]
    async fn test_status_filter_and_ending_soon_sort() {
        let repo = MemoryRepository::seeded();
        let mut db = repo.db().await.unwrap();
        let query = PollQuery {
            status: Some(PollStatus::Active),
            sort: PollSort::EndingSoon,
            ..Default::default()
        };
        let polls = PollCommon::query(&mut db, &query, None).await.unwrap();
        assert!(polls.iter().all(|p| p.status == PollStatus::Active));
        assert!(polls.windows(2).all(|w| w[0].end_date <= w[1].end_date));
    }
}
