use crate::core::models::{
    ballot::Ballot,
    common::Pagination,
    poll::{Poll, PollCreate, PollQuery, PollStatus},
    voter::Voter,
};
use crate::core::ports::repository::{BallotCommon, PollCommon, RosterCommon, Store, TxStore};
use crate::core::roster::{self, OptionRoster};
use crate::error::Error;

pub async fn create_poll<T>(mut store: T, uid: &str, create: PollCreate) -> Result<String, Error>
where
    T: TxStore,
{
    let labels: Vec<String> = create
        .options
        .into_iter()
        .map(|l| l.trim().to_owned())
        .filter(|l| !l.is_empty())
        .collect();
    if labels.len() < 2 {
        return Err(Error::Validation("at least 2 non-empty options are required".into()));
    }
    if create.end_date < create.start_date {
        return Err(Error::Validation("end date cannot be before start date".into()));
    }
    let poll = Poll::new(
        create.title,
        create.description,
        create.category,
        create.start_date,
        create.end_date,
        labels,
        uid,
    );
    let id = PollCommon::insert(&mut store, poll).await?;
    store.commit().await?;
    Ok(id)
}

pub async fn query_polls<S>(store: &mut S, query: &PollQuery, page: i64, size: i64) -> Result<(Vec<Poll>, i64), Error>
where
    S: Store,
{
    let total = PollCommon::count(store, query).await?;
    let polls = PollCommon::query(store, query, Some(Pagination::new(size, Some((page - 1) * size)))).await?;
    Ok((polls, total))
}

pub async fn get_poll<S>(store: &mut S, id: &str) -> Result<Poll, Error>
where
    S: Store,
{
    PollCommon::get(store, id).await
}

/// A poll together with the requesting viewer's own ballot, if any.
pub async fn poll_detail<S>(store: &mut S, uid: &str, id: &str) -> Result<(Poll, Option<Ballot>), Error>
where
    S: Store,
{
    let poll = PollCommon::get(store, id).await?;
    let ballot = BallotCommon::get(store, id, uid).await?;
    Ok((poll, ballot))
}

pub async fn transition_status<T>(mut store: T, id: &str, to: PollStatus) -> Result<Poll, Error>
where
    T: TxStore,
{
    let mut poll = PollCommon::get(&mut store, id).await?;
    if !poll.status.can_transition(to) {
        return Err(Error::IllegalTransition { from: poll.status, to });
    }
    poll.status = to;
    PollCommon::save(&mut store, poll.clone()).await?;
    store.commit().await?;
    Ok(poll)
}

pub async fn sample_voters<S>(store: &mut S, id: &str) -> Result<Vec<OptionRoster<Voter>>, Error>
where
    S: Store,
{
    let poll = PollCommon::get(store, id).await?;
    let pool = RosterCommon::voter_pool(store).await?;
    Ok(roster::distribute_voters(&poll.options, &pool))
}
