//! The `ContactStore` and `ContactListStore` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `rolodex-store-sqlite`). The service layer (`rolodex-api`) depends on
//! these abstractions, not on any concrete backend.
//!
//! Single-record gets return `Ok(None)` for a missing record; translating
//! that into a not-found error is the service layer's job. Deletes are
//! idempotent: deleting an absent record succeeds.

use std::future::Future;

use uuid::Uuid;

use crate::{
  contact::{Contact, ContactDraft},
  list::{ContactList, ContactListDraft, OnListDelete},
};

// ─── Contacts ────────────────────────────────────────────────────────────────

/// Abstraction over a contact store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The store
/// provides whatever write serialization it has; there is no
/// optimistic-concurrency token — concurrent saves to the same record are
/// last-writer-wins.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by email. At most one match is expected.
  fn get_contact_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Retrieve a contact by phone. At most one match is expected.
  fn get_contact_by_phone<'a>(
    &'a self,
    phone: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// List all contacts. No ordering guarantee; the full result set is
  /// materialised in memory.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// List contacts whose list reference equals `list_id`.
  fn list_contacts_by_list(
    &self,
    list_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// List contacts belonging to any list owned by `user_id` (a join across
  /// the two entities).
  fn list_contacts_by_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Case-insensitive substring match of `fragment` against first, last,
  /// and preferred name. A contact matching in several fields appears once.
  /// An empty fragment matches every contact with at least one name set
  /// (plain substring semantics, no special case).
  fn search_contacts_by_name<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// Persist a new contact and return the stored record. Generates an id
  /// when the draft carries none; `created_at` is set by the store.
  fn create_contact(
    &self,
    draft: ContactDraft,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Full-row replacement of an existing record. The caller must have
  /// already loaded it.
  fn save_contact<'a>(
    &'a self,
    contact: &'a Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove a contact. Idempotent: succeeds whether or not the record
  /// exists.
  fn delete_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Contact lists ───────────────────────────────────────────────────────────

/// Abstraction over a contact list store backend. Leaf component: has no
/// dependency on contacts except through the on-delete policy.
pub trait ContactListStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Retrieve a list by id. Returns `None` if not found.
  fn get_contact_list(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ContactList>, Self::Error>> + Send + '_;

  /// List all contact lists.
  fn list_contact_lists(
    &self,
  ) -> impl Future<Output = Result<Vec<ContactList>, Self::Error>> + Send + '_;

  /// List the contact lists owned by `user_id`.
  fn list_contact_lists_by_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ContactList>, Self::Error>> + Send + '_;

  /// Persist a new list and return the stored record.
  fn create_contact_list(
    &self,
    draft: ContactListDraft,
  ) -> impl Future<Output = Result<ContactList, Self::Error>> + Send + '_;

  /// Full-row replacement of an existing record.
  fn save_contact_list<'a>(
    &'a self,
    list: &'a ContactList,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove a list, applying `policy` to its contacts in the same
  /// transaction. Idempotent when the list is absent.
  fn delete_contact_list(
    &self,
    id: Uuid,
    policy: OnListDelete,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
