//! Entry handlers.

use crate::http::envelope::{Action, ApiError, Reply};
use crate::http::request::{decode_json, parse_entry_id, require_param, validation_error};
use crate::model::{Entry, EntryInput};
use crate::usecase::EntryUseCase;

const RESOURCE: &str = "entry";

type EntryReply<T> = Result<Reply<T>, ApiError>;

fn decode_input(body: &[u8]) -> Result<EntryInput, ApiError> {
    let input: EntryInput = decode_json(body)?;
    input.validate().map_err(validation_error)?;
    Ok(input)
}

pub async fn list(uc: &dyn EntryUseCase) -> EntryReply<Vec<Entry>> {
    let entries = uc
        .list_entries()
        .await
        .map_err(|e| ApiError::from_store(e, "entries", Action::List))?;
    Ok(Reply::ok(entries, "entries retrieved successfully"))
}

pub async fn get_by_id(uc: &dyn EntryUseCase, raw_id: &str) -> EntryReply<Entry> {
    let id = parse_entry_id(raw_id)?;
    let entry = uc
        .entry_by_id(id)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Get))?;
    Ok(Reply::ok(entry, "entry retrieved successfully"))
}

pub async fn get_by_slug(uc: &dyn EntryUseCase, slug: &str) -> EntryReply<Entry> {
    let slug = require_param(slug, "slug")?;
    let entry = uc
        .entry_by_slug(slug)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Get))?;
    Ok(Reply::ok(entry, "entry retrieved successfully"))
}

pub async fn create(uc: &dyn EntryUseCase, body: &[u8]) -> EntryReply<Entry> {
    let input = decode_input(body)?;
    let entry = uc
        .create_entry(input)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Create))?;
    tracing::info!(id = entry.id, slug = %entry.slug, "Entry created");
    Ok(Reply::created(entry, "entry created successfully"))
}

pub async fn update(uc: &dyn EntryUseCase, raw_id: &str, body: &[u8]) -> EntryReply<Entry> {
    let id = parse_entry_id(raw_id)?;
    let input = decode_input(body)?;
    let entry = uc
        .update_entry(id, input)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Update))?;
    Ok(Reply::ok(entry, "entry updated successfully"))
}

pub async fn delete(uc: &dyn EntryUseCase, raw_id: &str) -> EntryReply<Entry> {
    let id = parse_entry_id(raw_id)?;
    let entry = uc
        .delete_entry(id)
        .await
        .map_err(|e| ApiError::from_store(e, RESOURCE, Action::Delete))?;
    tracing::info!(id = entry.id, "Entry deleted");
    Ok(Reply::ok(entry, "entry deleted successfully"))
}
