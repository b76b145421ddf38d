//! Error type for `rolodex-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The unique index on `contacts.email` rejected an insert or save.
  #[error("a contact with email {0:?} already exists")]
  DuplicateEmail(String),

  /// The `restrict` on-delete policy refused to delete a non-empty list.
  #[error("contact list {0} still has contacts")]
  ListInUse(Uuid),
}

/// Lift backend errors into the shared taxonomy. Uniqueness and policy
/// refusals keep their typed form; everything else is carried through as an
/// opaque storage failure.
impl From<Error> for rolodex_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::DuplicateEmail(email) => rolodex_core::Error::DuplicateEmail(email),
      Error::ListInUse(id) => rolodex_core::Error::ListInUse(id),
      other => rolodex_core::Error::Storage(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
