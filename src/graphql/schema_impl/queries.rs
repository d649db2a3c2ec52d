use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::session_from_context,
    errors::AppResult,
    models::dto::response::SessionQuotaDto,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn session_quota(&self, ctx: &Context<'_>) -> AppResult<SessionQuotaDto> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx)?;

        Ok(state.search_service.quota(session.as_str()).await)
    }

    async fn allowed_models(&self, ctx: &Context<'_>) -> AppResult<Vec<String>> {
        let state = ctx.data::<AppState>()?;
        session_from_context(ctx)?;

        Ok(state.search_service.allowed_models().to_vec())
    }
}
