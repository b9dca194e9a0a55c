use actix_web::web::{Data, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::context::UserInfo;
use crate::core::models::poll::{Poll, PollCreate, PollQuery, PollSort, PollStatus};
use crate::core::models::voter::Voter;
use crate::core::ports::repository::Manager;
use crate::core::roster::OptionRoster;
use crate::core::services;
use crate::core::tally;
use crate::error::Error;
use crate::impls::memory::MemoryRepository;
use crate::response::List;

#[derive(Debug, Serialize)]
pub struct CreationResponse {
    pub id: String,
}

pub async fn create(user: UserInfo, repo: Data<MemoryRepository>, body: Json<PollCreate>) -> Result<Json<CreationResponse>, Error> {
    let tx = repo.tx().await?;
    let id = services::poll::create_poll(tx, &user.id, body.into_inner()).await?;
    Ok(Json(CreationResponse { id }))
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<PollStatus>,
    #[serde(default)]
    pub sort: PollSort,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

pub async fn list(repo: Data<MemoryRepository>, params: Query<ListParams>) -> Result<Json<List<Poll>>, Error> {
    let params = params.into_inner();
    let query = PollQuery {
        search: params.search,
        category: params.category,
        status: params.status,
        sort: params.sort,
    };
    let mut db = repo.db().await?;
    let (polls, total) = services::poll::query_polls(&mut db, &query, params.page, params.size).await?;
    Ok(Json(List::new(polls, total)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDetail {
    #[serde(flatten)]
    pub poll: Poll,
    pub has_voted: bool,
    pub user_vote: Option<String>,
}

pub async fn detail(user: UserInfo, path: Path<(String,)>, repo: Data<MemoryRepository>) -> Result<Json<PollDetail>, Error> {
    let (poll_id,) = path.into_inner();
    let mut db = repo.db().await?;
    let (poll, ballot) = services::poll::poll_detail(&mut db, &user.id, &poll_id).await?;
    Ok(Json(PollDetail {
        poll,
        has_voted: ballot.is_some(),
        user_vote: ballot.map(|b| b.option_id),
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: PollStatus,
}

pub async fn update_status(
    _user: UserInfo,
    path: Path<(String,)>,
    repo: Data<MemoryRepository>,
    body: Json<StatusUpdate>,
) -> Result<Json<Poll>, Error> {
    let (poll_id,) = path.into_inner();
    let tx = repo.tx().await?;
    let poll = services::poll::transition_status(tx, &poll_id, body.status).await?;
    Ok(Json(poll))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionResult {
    pub id: String,
    pub label: String,
    pub votes: i64,
    pub percentage: f64,
    pub display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResults {
    pub id: String,
    pub title: String,
    pub status: PollStatus,
    pub total_votes: i64,
    pub options: Vec<OptionResult>,
}

pub async fn results(path: Path<(String,)>, repo: Data<MemoryRepository>) -> Result<Json<PollResults>, Error> {
    let (poll_id,) = path.into_inner();
    let mut db = repo.db().await?;
    let poll = services::poll::get_poll(&mut db, &poll_id).await?;
    let options = poll
        .options
        .iter()
        .map(|o| OptionResult {
            id: o.id.clone(),
            label: o.label.clone(),
            votes: o.votes,
            percentage: o.percentage,
            display: tally::format_percentage(o.votes, poll.total_votes),
        })
        .collect();
    Ok(Json(PollResults {
        id: poll.id,
        title: poll.title,
        status: poll.status,
        total_votes: poll.total_votes,
        options,
    }))
}

pub async fn voters(path: Path<(String,)>, repo: Data<MemoryRepository>) -> Result<Json<Vec<OptionRoster<Voter>>>, Error> {
    let (poll_id,) = path.into_inner();
    let mut db = repo.db().await?;
    let rosters = services::poll::sample_voters(&mut db, &poll_id).await?;
    Ok(Json(rosters))
}
