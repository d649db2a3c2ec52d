use actix_web::web;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{auth::AuthorizedSession, graphql::Schema};

pub async fn graphql(
    schema: web::Data<Schema>,
    session: AuthorizedSession,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner().data(session)).await.into()
}
