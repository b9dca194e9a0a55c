use serde::{Deserialize, Serialize};

/// A display identity for the "view voters" dialog. Rosters are sampled from a
/// pool of these; they never feed back into the tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voter {
    pub id: String,
    pub name: String,
}

impl Voter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Voter {
            id: id.into(),
            name: name.into(),
        }
    }
}
