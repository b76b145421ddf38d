//! Contact list orchestration and the `/contact-lists` handlers.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contact-lists` | all lists |
//! | `POST`   | `/contact-lists` | 201 |
//! | `GET`    | `/contact-lists/:id` | 404 if not found |
//! | `PUT`    | `/contact-lists/:id` | full replace of name and owner |
//! | `DELETE` | `/contact-lists/:id` | 204; applies the on-delete policy |
//! | `GET`    | `/contact-lists/user/:user_id` | lists owned by one user |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rolodex_core::{
  Error, Result,
  event::ChangeEvent,
  list::{ContactList, ContactListDraft, ContactListUpdate, OnListDelete},
  store::{ContactListStore, ContactStore},
};
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, events::EventBus};

// ─── Service ─────────────────────────────────────────────────────────────────

/// Orchestration over a [`ContactListStore`]. Updates are full replacements
/// (no partial-update policy here, unlike contacts); deletes apply the
/// configured [`OnListDelete`] policy.
pub struct ContactListService<S> {
  store:     Arc<S>,
  events:    EventBus,
  on_delete: OnListDelete,
}

impl<S> Clone for ContactListService<S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      events:    self.events.clone(),
      on_delete: self.on_delete,
    }
  }
}

impl<S: ContactListStore> ContactListService<S> {
  pub fn new(store: Arc<S>, events: EventBus, on_delete: OnListDelete) -> Self {
    Self { store, events, on_delete }
  }

  pub async fn get(&self, id: Uuid) -> Result<ContactList> {
    info!("fetching contact list by id: {id}");
    self
      .store
      .get_contact_list(id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::ListNotFound(id))
  }

  pub async fn get_all(&self) -> Result<Vec<ContactList>> {
    info!("fetching all contact lists");
    self.store.list_contact_lists().await.map_err(Into::into)
  }

  pub async fn get_all_by_user(&self, user_id: Uuid) -> Result<Vec<ContactList>> {
    info!("fetching all contact lists for user: {user_id}");
    self
      .store
      .list_contact_lists_by_user(user_id)
      .await
      .map_err(Into::into)
  }

  pub async fn create(&self, draft: ContactListDraft) -> Result<ContactList> {
    info!("creating new contact list");
    let list = self
      .store
      .create_contact_list(draft)
      .await
      .map_err(Into::into)?;
    self
      .events
      .publish(ChangeEvent::ListCreated { list: list.clone() });
    Ok(list)
  }

  /// Full replace: both `list_name` and `user_id` are overwritten
  /// unconditionally. Strict on a missing target.
  pub async fn update(
    &self,
    id: Uuid,
    update: ContactListUpdate,
  ) -> Result<ContactList> {
    info!("updating contact list with id: {id}");
    let mut list = self
      .store
      .get_contact_list(id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::ListNotFound(id))?;

    list.list_name = update.list_name;
    list.user_id = update.user_id;
    self
      .store
      .save_contact_list(&list)
      .await
      .map_err(Into::into)?;

    self
      .events
      .publish(ChangeEvent::ListUpdated { list: list.clone() });
    Ok(list)
  }

  /// Idempotent when the list is absent; a populated list is handled per
  /// the configured policy (restrict refuses with
  /// [`Error::ListInUse`]).
  pub async fn delete(&self, id: Uuid) -> Result<()> {
    info!("deleting contact list by id: {id} (policy {:?})", self.on_delete);
    self
      .store
      .delete_contact_list(id, self.on_delete)
      .await
      .map_err(Into::into)?;
    self.events.publish(ChangeEvent::ListDeleted { id });
    Ok(())
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ContactList>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.lists.get(id).await?))
}

pub async fn get_all<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<ContactList>>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.lists.get_all().await?))
}

pub async fn get_all_by_user<S>(
  State(state): State<ApiState<S>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ContactList>>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.lists.get_all_by_user(user_id).await?))
}

pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(draft): Json<ContactListDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  let list = state.lists.create(draft).await?;
  Ok((StatusCode::CREATED, Json(list)))
}

pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ContactListUpdate>,
) -> Result<Json<ContactList>, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  Ok(Json(state.lists.update(id, body).await?))
}

pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore + ContactListStore + 'static,
{
  state.lists.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
