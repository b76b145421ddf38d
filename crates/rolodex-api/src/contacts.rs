//! Contact orchestration and the `/contacts` handlers.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | all contacts |
//! | `POST`   | `/contacts` | 201; 400 when the draft has no fields set |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `PATCH`  | `/contacts/:id` | partial update, see [`ContactPatch`] |
//! | `DELETE` | `/contacts/:id` | 204; idempotent |
//! | `GET`    | `/contacts/email/:email` | |
//! | `GET`    | `/contacts/phone/:phone` | |
//! | `GET`    | `/contacts/search/:fragment` | substring name search |
//! | `GET`    | `/contacts/contact-list/:id` | members of one list |
//! | `GET`    | `/contacts/user/:user_id` | joins through the user's lists |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rolodex_core::{
  Error, Result,
  contact::{Contact, ContactDraft, ContactPatch},
  event::ChangeEvent,
  store::{ContactListStore, ContactStore},
};
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, events::EventBus};

// ─── Service ─────────────────────────────────────────────────────────────────

/// Orchestration over a [`ContactStore`]: not-found translation on
/// single-record lookups, the partial-update merge, and change-event
/// publication after successful mutations.
pub struct ContactService<S> {
  store:  Arc<S>,
  events: EventBus,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), events: self.events.clone() }
  }
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>, events: EventBus) -> Self {
    Self { store, events }
  }

  pub async fn get(&self, id: Uuid) -> Result<Contact> {
    info!("fetching contact by id: {id}");
    self
      .store
      .get_contact(id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::ContactNotFound(id))
  }

  pub async fn get_by_email(&self, email: &str) -> Result<Contact> {
    info!("fetching contact by email: {email}");
    self
      .store
      .get_contact_by_email(email)
      .await
      .map_err(Into::into)?
      .ok_or_else(|| Error::ContactNotFoundByEmail(email.to_owned()))
  }

  pub async fn get_by_phone(&self, phone: &str) -> Result<Contact> {
    info!("fetching contact by phone: {phone}");
    self
      .store
      .get_contact_by_phone(phone)
      .await
      .map_err(Into::into)?
      .ok_or_else(|| Error::ContactNotFoundByPhone(phone.to_owned()))
  }

  pub async fn get_all(&self) -> Result<Vec<Contact>> {
    info!("fetching all contacts");
    self.store.list_contacts().await.map_err(Into::into)
  }

  pub async fn get_all_by_list(&self, list_id: Uuid) -> Result<Vec<Contact>> {
    info!("fetching all contacts in list: {list_id}");
    self
      .store
      .list_contacts_by_list(list_id)
      .await
      .map_err(Into::into)
  }

  pub async fn get_all_by_user(&self, user_id: Uuid) -> Result<Vec<Contact>> {
    info!("fetching all contacts for user: {user_id}");
    self
      .store
      .list_contacts_by_user(user_id)
      .await
      .map_err(Into::into)
  }

  pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Contact>> {
    info!("searching contacts by name containing: {fragment}");
    self
      .store
      .search_contacts_by_name(fragment)
      .await
      .map_err(Into::into)
  }

  pub async fn create(&self, draft: ContactDraft) -> Result<Contact> {
    info!("creating new contact");
    let contact = self
      .store
      .create_contact(draft)
      .await
      .map_err(Into::into)?;
    self
      .events
      .publish(ChangeEvent::ContactCreated { contact: contact.clone() });
    Ok(contact)
  }

  /// Load, merge, persist. Strict: a missing target is
  /// [`Error::ContactNotFound`], unlike [`Self::delete`].
  pub async fn update(&self, id: Uuid, patch: ContactPatch) -> Result<Contact> {
    info!("updating contact with id: {id}");
    let mut contact = self
      .store
      .get_contact(id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::ContactNotFound(id))?;

    patch.apply_to(&mut contact);
    self.store.save_contact(&contact).await.map_err(Into::into)?;

    self
      .events
      .publish(ChangeEvent::ContactUpdated { contact: contact.clone() });
    Ok(contact)
  }

  /// Unconditional delete; succeeds for ids that never existed. The
  /// deletion event is published either way, mirroring the lenient
  /// contract.
  pub async fn delete(&self, id: Uuid) -> Result<()> {
    info!("deleting contact by id: {id}");
    self.store.delete_contact(id).await.map_err(Into::into)?;
    self.events.publish(ChangeEvent::ContactDeleted { id });
    Ok(())
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.get(id).await?))
}

pub async fn get_by_email<S>(
  State(state): State<ApiState<S>>,
  Path(email): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.get_by_email(&email).await?))
}

pub async fn get_by_phone<S>(
  State(state): State<ApiState<S>>,
  Path(phone): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.get_by_phone(&phone).await?))
}

pub async fn get_all<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.get_all().await?))
}

pub async fn get_all_by_list<S>(
  State(state): State<ApiState<S>>,
  Path(list_id): Path<Uuid>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.get_all_by_list(list_id).await?))
}

pub async fn get_all_by_user<S>(
  State(state): State<ApiState<S>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.get_all_by_user(user_id).await?))
}

pub async fn search<S>(
  State(state): State<ApiState<S>>,
  Path(fragment): Path<String>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.search_by_name(&fragment).await?))
}

/// `POST /contacts`. The boundary enforces the advisory draft check: an
/// all-empty payload is rejected before it reaches the store.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(draft): Json<ContactDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  if !draft.has_content() {
    return Err(ApiError::BadRequest("contact has no fields set".into()));
  }
  let contact = state.contacts.create(draft).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<ContactPatch>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.contacts.update(id, patch).await?))
}

pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  state.contacts.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
