use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One viewer's choice on one poll. At most one ballot exists per
/// `(poll_id, user_id)` pair; casting again replaces the previous row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    pub id: String,
    pub poll_id: String,
    pub user_id: String,
    pub option_id: String,
    pub cast_at: DateTime<Utc>,
}

impl Ballot {
    pub fn new(poll_id: impl Into<String>, user_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Ballot {
            id: uuid::Uuid::new_v4().to_string(),
            poll_id: poll_id.into(),
            user_id: user_id.into(),
            option_id: option_id.into(),
            cast_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotCast {
    pub option_id: String,
}
