use async_graphql::{Context, ErrorExtensions, Object};

use crate::{
    app_state::AppState,
    auth::session_from_context,
    models::dto::{request::SearchRequestDto, response::SearchResponseDto},
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Same contract as `POST /api/searches`; failures carry `extensions.code`.
    async fn run_search(
        &self,
        ctx: &Context<'_>,
        input: SearchRequestDto,
    ) -> async_graphql::Result<SearchResponseDto> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx).map_err(|e| e.extend())?;

        let outcome = state
            .search_service
            .submit(session.as_str(), input)
            .await
            .map_err(|e| e.extend())?;
        Ok(outcome.into())
    }
}
