use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthorizedSession,
    errors::AppError,
    models::dto::{request::SearchRequestDto, response::SearchResponseDto},
};

#[post("/searches")]
pub async fn run_search(
    state: web::Data<AppState>,
    request: web::Json<SearchRequestDto>,
    session: AuthorizedSession,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .search_service
        .submit(session.0.as_str(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(SearchResponseDto::from(outcome)))
}

#[get("/session/quota")]
pub async fn session_quota(
    state: web::Data<AppState>,
    session: AuthorizedSession,
) -> Result<HttpResponse, AppError> {
    let quota = state.search_service.quota(session.0.as_str()).await;
    Ok(HttpResponse::Ok().json(quota))
}
