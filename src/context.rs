use actix_web::{self, Error, FromRequest};
use std::future::{ready, Ready};

// Identity is established upstream by the hosted auth provider; the gateway
// forwards the authenticated subject in this header.
const USER_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: String,
}

impl FromRequest for UserInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let id = req
            .headers()
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        match id {
            Some(id) => ready(Ok(UserInfo { id })),
            None => ready(Err(actix_web::error::ErrorUnauthorized(""))),
        }
    }
}
