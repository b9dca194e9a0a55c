use crate::core::models::{
    ballot::Ballot,
    common::Pagination,
    poll::{Poll, PollQuery},
    voter::Voter,
};
use crate::error::Error;

pub trait PollCommon {
    async fn insert(&mut self, poll: Poll) -> Result<String, Error>;
    async fn get(&mut self, id: &str) -> Result<Poll, Error>;
    async fn save(&mut self, poll: Poll) -> Result<(), Error>;
    async fn query(&mut self, query: &PollQuery, pagination: Option<Pagination>) -> Result<Vec<Poll>, Error>;
    async fn count(&mut self, query: &PollQuery) -> Result<i64, Error>;
}

pub trait BallotCommon {
    async fn get(&mut self, poll_id: &str, user_id: &str) -> Result<Option<Ballot>, Error>;
    async fn upsert(&mut self, ballot: Ballot) -> Result<(), Error>;
}

pub trait RosterCommon {
    async fn voter_pool(&mut self) -> Result<Vec<Voter>, Error>;
}

pub trait Store: PollCommon + BallotCommon + RosterCommon {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type Tx: TxStore;
    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::Tx, Error>;
}
