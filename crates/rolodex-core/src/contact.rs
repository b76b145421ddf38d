//! Contact — a person record and its transfer shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ─── Record ──────────────────────────────────────────────────────────────────

/// A persisted contact record.
///
/// `id` and `created_at` are assigned at creation and never change.
/// `contact_list_id` is a weak reference by id to the owning
/// [`ContactList`](crate::list::ContactList); the contact does not own the
/// list's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  pub id:              Uuid,
  pub contact_list_id: Option<Uuid>,
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub preferred_name:  Option<String>,
  pub email:           Option<String>,
  pub phone:           Option<String>,
  pub fax:             Option<String>,
  pub address_id:      Option<Uuid>,
  pub do_not_contact:  bool,
  pub created_at:      DateTime<Utc>,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Creation payload for a contact.
///
/// `id` may be caller-supplied; when absent the store generates one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
  pub id:              Option<Uuid>,
  pub contact_list_id: Option<Uuid>,
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub preferred_name:  Option<String>,
  pub email:           Option<String>,
  pub phone:           Option<String>,
  pub fax:             Option<String>,
  pub address_id:      Option<Uuid>,
  pub do_not_contact:  bool,
}

impl ContactDraft {
  /// Advisory validity check: a draft is meaningful when at least one field
  /// is set. The store never blocks a write on this; the boundary layer
  /// decides whether to reject empty drafts.
  pub fn has_content(&self) -> bool {
    self.id.is_some()
      || self.contact_list_id.is_some()
      || self.first_name.is_some()
      || self.last_name.is_some()
      || self.preferred_name.is_some()
      || self.email.is_some()
      || self.phone.is_some()
      || self.fax.is_some()
      || self.address_id.is_some()
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// One field of a [`ContactPatch`].
///
/// Deserialises from JSON as: field absent → `Keep`, `null` → `Clear`,
/// any value → `Set`. This keeps "leave unchanged" and "set to empty"
/// distinct on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
  /// Leave the stored value unchanged.
  #[default]
  Keep,
  /// Clear the stored value.
  Clear,
  /// Replace the stored value.
  Set(T),
}

impl<T> Patch<T> {
  /// Apply this patch to a stored slot.
  pub fn apply(self, slot: &mut Option<T>) {
    match self {
      Patch::Keep => {}
      Patch::Clear => *slot = None,
      Patch::Set(v) => *slot = Some(v),
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    // A present-but-null field reaches this point; an absent field never
    // does (serde's struct default kicks in instead, yielding Keep).
    Ok(match Option::<T>::deserialize(deserializer)? {
      Some(v) => Patch::Set(v),
      None => Patch::Clear,
    })
  }
}

/// Field-update set for partial contact updates.
///
/// Per-field policy:
///
/// | field                          | absent          | `null`       | value |
/// |--------------------------------|-----------------|--------------|-------|
/// | first/last/preferred name,     | keep stored     | clear stored | set   |
/// | email, phone, fax              |                 |              |       |
/// | address_id                     | set to `None`   | set to `None`| set   |
/// | do_not_contact                 | set to `false`  | —            | set   |
///
/// `address_id` and `do_not_contact` are always overwritten with whatever
/// the payload carries; they cannot express "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
  pub first_name:     Patch<String>,
  pub last_name:      Patch<String>,
  pub preferred_name: Patch<String>,
  pub email:          Patch<String>,
  pub phone:          Patch<String>,
  pub fax:            Patch<String>,
  pub address_id:     Option<Uuid>,
  pub do_not_contact: bool,
}

impl ContactPatch {
  /// Merge this patch into a stored record, honouring the per-field policy
  /// above. `id` and `created_at` are never touched.
  pub fn apply_to(self, contact: &mut Contact) {
    self.first_name.apply(&mut contact.first_name);
    self.last_name.apply(&mut contact.last_name);
    self.preferred_name.apply(&mut contact.preferred_name);
    self.email.apply(&mut contact.email);
    self.phone.apply(&mut contact.phone);
    self.fax.apply(&mut contact.fax);
    contact.address_id = self.address_id;
    contact.do_not_contact = self.do_not_contact;
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn stored() -> Contact {
    Contact {
      id:              Uuid::new_v4(),
      contact_list_id: None,
      first_name:      Some("June".into()),
      last_name:       Some("Thomas".into()),
      preferred_name:  None,
      email:           Some("june@test.com".into()),
      phone:           Some("555-1234".into()),
      fax:             Some("555-9999".into()),
      address_id:      Some(Uuid::new_v4()),
      do_not_contact:  true,
      created_at:      Utc::now(),
    }
  }

  #[test]
  fn patch_deserialises_absent_null_and_value() {
    let patch: ContactPatch =
      serde_json::from_str(r#"{"first_name":"A","fax":null}"#).unwrap();

    assert_eq!(patch.first_name, Patch::Set("A".into()));
    assert_eq!(patch.fax, Patch::Clear);
    assert_eq!(patch.last_name, Patch::Keep);
    assert_eq!(patch.email, Patch::Keep);
  }

  #[test]
  fn apply_keeps_unpatched_fields() {
    let mut contact = stored();
    let before = contact.clone();

    let patch = ContactPatch {
      first_name: Patch::Set("Anne".into()),
      ..Default::default()
    };
    patch.apply_to(&mut contact);

    assert_eq!(contact.first_name.as_deref(), Some("Anne"));
    assert_eq!(contact.last_name, before.last_name);
    assert_eq!(contact.email, before.email);
    assert_eq!(contact.phone, before.phone);
    assert_eq!(contact.fax, before.fax);
    assert_eq!(contact.id, before.id);
    assert_eq!(contact.created_at, before.created_at);
  }

  #[test]
  fn apply_always_overwrites_address_and_do_not_contact() {
    let mut contact = stored();
    assert!(contact.address_id.is_some());
    assert!(contact.do_not_contact);

    // A patch that names neither field still resets both.
    ContactPatch::default().apply_to(&mut contact);

    assert_eq!(contact.address_id, None);
    assert!(!contact.do_not_contact);
  }

  #[test]
  fn apply_clear_empties_a_field() {
    let mut contact = stored();
    let patch = ContactPatch { fax: Patch::Clear, ..Default::default() };
    patch.apply_to(&mut contact);
    assert_eq!(contact.fax, None);
  }

  #[test]
  fn empty_draft_has_no_content() {
    assert!(!ContactDraft::default().has_content());
    let draft = ContactDraft {
      email: Some("a@b.test".into()),
      ..Default::default()
    };
    assert!(draft.has_content());
  }
}
