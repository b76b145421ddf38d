//! Contact list — a named grouping of contacts owned by one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted contact list record. Owns zero-or-more contacts through
/// their `contact_list_id` back reference; belongs to exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactList {
  pub id:         Uuid,
  pub list_name:  String,
  pub user_id:    Uuid,
  pub created_at: DateTime<Utc>,
}

/// Creation payload. `id` may be caller-supplied; when absent the store
/// generates one.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactListDraft {
  #[serde(default)]
  pub id:        Option<Uuid>,
  pub list_name: String,
  pub user_id:   Uuid,
}

/// Full-replace update payload. Unlike contacts, list updates carry no
/// partial-update policy: both fields are overwritten unconditionally.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactListUpdate {
  pub list_name: String,
  pub user_id:   Uuid,
}

/// What happens to a list's contacts when the list is deleted.
///
/// The contact→list reference is a plain foreign-key value; the policy is
/// applied by the store inside the delete transaction, not by schema
/// `ON DELETE` clauses.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum OnListDelete {
  /// Refuse to delete a list that still has contacts.
  Restrict,
  /// Delete the list's contacts along with the list.
  Cascade,
  /// Detach the contacts (clear their reference), then delete the list.
  #[default]
  SetNull,
}
