//! Author handlers.

use crate::http::envelope::{Action, ApiError, Reply};
use crate::http::request::{decode_json, require_param, validation_error};
use crate::model::{Author, AuthorChanges, NewAuthor};
use crate::usecase::AuthorUseCase;

const RESOURCE: &str = "author";

type AuthorReply<T> = Result<Reply<T>, ApiError>;

pub async fn list(uc: &dyn AuthorUseCase) -> AuthorReply<Vec<Author>> {
    let authors = uc
        .list_authors()
        .await
        .map_err(|e| ApiError::from_store(e, "authors", Action::List))?;
    Ok(Reply::ok(authors, "authors retrieved successfully"))
}

pub async fn get_by_username(uc: &dyn AuthorUseCase, username: &str) -> AuthorReply<Author> {
    let username = require_param(username, "username")?;
    let author = uc
        .author_by_username(username)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Get))?;
    Ok(Reply::ok(author, "author retrieved successfully"))
}

pub async fn get_by_email(uc: &dyn AuthorUseCase, email: &str) -> AuthorReply<Author> {
    let email = require_param(email, "email")?;
    let author = uc
        .author_by_email(email)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Get))?;
    Ok(Reply::ok(author, "author retrieved successfully"))
}

pub async fn create(uc: &dyn AuthorUseCase, body: &[u8]) -> AuthorReply<Author> {
    let author: NewAuthor = decode_json(body)?;
    author.validate().map_err(validation_error)?;

    let author = uc
        .create_author(author)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Create))?;
    tracing::info!(id = author.id, username = %author.username, "Author created");
    Ok(Reply::created(author, "author created successfully"))
}

pub async fn update(uc: &dyn AuthorUseCase, username: &str, body: &[u8]) -> AuthorReply<Author> {
    let username = require_param(username, "username")?;
    let changes: AuthorChanges = decode_json(body)?;
    changes.validate().map_err(validation_error)?;

    let author = uc
        .update_author(username, changes)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Update))?;
    Ok(Reply::ok(author, "author updated successfully"))
}

pub async fn delete(uc: &dyn AuthorUseCase, username: &str) -> AuthorReply<Author> {
    let username = require_param(username, "username")?;
    let author = uc
        .delete_author(username)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Delete))?;
    tracing::info!(username = %author.username, "Author deleted");
    Ok(Reply::ok(author, "author deleted successfully"))
}
