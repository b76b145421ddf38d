//! Error types for `rolodex-core`.
//!
//! Single-record lookups and updates are strict: a missing target surfaces a
//! typed not-found error carrying the lookup key. Deletes are deliberately
//! lenient (idempotent) and never raise these. The two contracts are distinct
//! on purpose; do not unify them.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact not found: {0}")]
  ContactNotFound(Uuid),

  #[error("no contact with email {0:?}")]
  ContactNotFoundByEmail(String),

  #[error("no contact with phone {0:?}")]
  ContactNotFoundByPhone(String),

  #[error("contact list not found: {0}")]
  ListNotFound(Uuid),

  /// Raised by the `restrict` on-delete policy when contacts still
  /// reference the list.
  #[error("contact list {0} still has contacts")]
  ListInUse(Uuid),

  #[error("a contact with email {0:?} already exists")]
  DuplicateEmail(String),

  /// Any other backend failure, propagated unchanged.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
