//! JSON REST API for the rolodex contact service.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`ContactStore`] + [`ContactListStore`]. Transport concerns (TLS,
//! tracing layers) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", rolodex_api::api_router(state))
//! ```

pub mod contacts;
pub mod error;
pub mod events;
pub mod lists;

use axum::{
  Router,
  routing::get,
};
use rolodex_core::store::{ContactListStore, ContactStore};

pub use contacts::ContactService;
pub use error::ApiError;
pub use events::EventBus;
pub use lists::ContactListService;

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct ApiState<S> {
  pub contacts: ContactService<S>,
  pub lists:    ContactListService<S>,
  pub events:   EventBus,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      contacts: self.contacts.clone(),
      lists:    self.lists.clone(),
      events:   self.events.clone(),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: ContactStore + ContactListStore + 'static,
{
  Router::new()
    // Contacts
    .route(
      "/contacts",
      get(contacts::get_all::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .patch(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .route("/contacts/email/{email}", get(contacts::get_by_email::<S>))
    .route("/contacts/phone/{phone}", get(contacts::get_by_phone::<S>))
    .route("/contacts/search/{fragment}", get(contacts::search::<S>))
    .route(
      "/contacts/contact-list/{id}",
      get(contacts::get_all_by_list::<S>),
    )
    .route("/contacts/user/{user_id}", get(contacts::get_all_by_user::<S>))
    // Contact lists
    .route(
      "/contact-lists",
      get(lists::get_all::<S>).post(lists::create::<S>),
    )
    .route(
      "/contact-lists/{id}",
      get(lists::get_one::<S>)
        .put(lists::update::<S>)
        .delete(lists::delete::<S>),
    )
    .route(
      "/contact-lists/user/{user_id}",
      get(lists::get_all_by_user::<S>),
    )
    // Event feed
    .route("/events", get(events::subscribe::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests;
