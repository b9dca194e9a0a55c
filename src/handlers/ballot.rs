use actix_web::web::{Data, Json, Path};

use crate::context::UserInfo;
use crate::core::models::ballot::BallotCast;
use crate::core::models::poll::Poll;
use crate::core::ports::repository::Manager;
use crate::core::services;
use crate::error::Error;
use crate::impls::memory::MemoryRepository;

pub async fn cast(
    user: UserInfo,
    path: Path<(String,)>,
    repo: Data<MemoryRepository>,
    body: Json<BallotCast>,
) -> Result<Json<Poll>, Error> {
    let (poll_id,) = path.into_inner();
    let tx = repo.tx().await?;
    let poll = services::ballot::cast_ballot(tx, &user.id, &poll_id, &body.option_id).await?;
    Ok(Json(poll))
}

#[cfg(test)]
mod test {
    use actix_web::http::StatusCode;
    use actix_web::web::{post, scope, Data};
    use actix_web::{test, App};
    use serde_json::json;

    use crate::impls::memory::MemoryRepository;

    #[actix_web::test]
    async fn test_cast_over_http() {
        let repo = MemoryRepository::seeded();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(repo))
                .service(scope("polls/{poll_id}").route("ballots", post().to(super::cast))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/polls/poll-001/ballots")
            .insert_header(("X-User-Id", "u1"))
            .set_json(json!({ "optionId": "opt2" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["totalVotes"], 257);
        assert_eq!(body["options"][1]["votes"], 112);

        // Without an upstream identity the request is refused.
        let req = test::TestRequest::post()
            .uri("/polls/poll-001/ballots")
            .set_json(json!({ "optionId": "opt1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // An option the poll does not carry fails loudly.
        let req = test::TestRequest::post()
            .uri("/polls/poll-001/ballots")
            .insert_header(("X-User-Id", "u1"))
            .set_json(json!({ "optionId": "opt9" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
