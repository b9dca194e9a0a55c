use crate::core::models::{ballot::Ballot, poll::Poll};
use crate::core::ports::repository::{BallotCommon, PollCommon, TxStore};
use crate::core::tally;
use crate::error::Error;

/// Casts or changes the viewer's vote on a poll. A prior ballot by the same
/// viewer is retracted from the tally and its row replaced, so the
/// `(poll_id, user_id)` pair stays unique.
pub async fn cast_ballot<T>(mut store: T, uid: &str, poll_id: &str, option_id: &str) -> Result<Poll, Error>
where
    T: TxStore,
{
    let mut poll = PollCommon::get(&mut store, poll_id).await?;
    let previous = BallotCommon::get(&mut store, poll_id, uid).await?;
    tally::cast_vote(&mut poll, option_id, previous.as_ref().map(|b| b.option_id.as_str()))?;
    BallotCommon::upsert(&mut store, Ballot::new(poll_id, uid, option_id)).await?;
    PollCommon::save(&mut store, poll.clone()).await?;
    store.commit().await?;
    Ok(poll)
}
