//! Per-resource handlers and the endpoint dispatcher.
//!
//! Handlers take a use-case trait object plus the raw path parameter and
//! body, and return `Result<Reply<T>, ApiError>`. Both sides render as the
//! response envelope.

pub mod authors;
pub mod entries;

use axum::response::{IntoResponse, Response};

use crate::routing::{Endpoint, RouteMatch};
use crate::usecase::Services;

/// Run the handler for a resolved route.
pub async fn handle(services: &Services, route: &RouteMatch, body: &[u8]) -> Response {
    let param = route.param.as_str();
    let e = services.entries.as_ref();
    let a = services.authors.as_ref();

    match route.endpoint {
        Endpoint::ListEntries => entries::list(e).await.into_response(),
        Endpoint::EntryById => entries::get_by_id(e, param).await.into_response(),
        Endpoint::EntryBySlug => entries::get_by_slug(e, param).await.into_response(),
        Endpoint::CreateEntry => entries::create(e, body).await.into_response(),
        Endpoint::UpdateEntry => entries::update(e, param, body).await.into_response(),
        Endpoint::DeleteEntry => entries::delete(e, param).await.into_response(),
        Endpoint::ListAuthors => authors::list(a).await.into_response(),
        Endpoint::AuthorByUsername => authors::get_by_username(a, param).await.into_response(),
        Endpoint::AuthorByEmail => authors::get_by_email(a, param).await.into_response(),
        Endpoint::CreateAuthor => authors::create(a, body).await.into_response(),
        Endpoint::UpdateAuthor => authors::update(a, param, body).await.into_response(),
        Endpoint::DeleteAuthor => authors::delete(a, param).await.into_response(),
    }
}
