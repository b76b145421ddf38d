//! Service-level tests against an in-memory SQLite store.
//!
//! These exercise the orchestration contracts: strict not-found on
//! get/update, lenient idempotent delete, the per-field partial-update
//! policy, and event publication.

use std::sync::Arc;

use rolodex_core::{
  Error,
  contact::{ContactDraft, ContactPatch, Patch},
  event::ChangeEvent,
  list::{ContactListDraft, ContactListUpdate, OnListDelete},
};
use rolodex_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{ContactListService, ContactService, EventBus};

async fn services(
  on_delete: OnListDelete,
) -> (ContactService<SqliteStore>, ContactListService<SqliteStore>, EventBus) {
  let store = Arc::new(
    SqliteStore::open_in_memory().await.expect("in-memory store"),
  );
  let events = EventBus::default();
  let contacts = ContactService::new(Arc::clone(&store), events.clone());
  let lists = ContactListService::new(store, events.clone(), on_delete);
  (contacts, lists, events)
}

fn june() -> ContactDraft {
  ContactDraft {
    first_name: Some("June".into()),
    last_name: Some("Thomas".into()),
    email: Some("june@test.com".into()),
    ..Default::default()
  }
}

// ─── Lookup contracts ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_by_email() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;

  contacts.create(june()).await.unwrap();

  let fetched = contacts.get_by_email("june@test.com").await.unwrap();
  assert_eq!(fetched.email.as_deref(), Some("june@test.com"));
  assert_eq!(fetched.first_name.as_deref(), Some("June"));
}

#[tokio::test]
async fn get_missing_contact_is_not_found() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;
  let id = Uuid::new_v4();

  let err = contacts.get(id).await.unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(missing) if missing == id));
}

#[tokio::test]
async fn lookup_errors_carry_the_key() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;

  let err = contacts.get_by_email("ghost@test.com").await.unwrap_err();
  assert!(
    matches!(err, Error::ContactNotFoundByEmail(ref email) if email == "ghost@test.com")
  );

  let err = contacts.get_by_phone("555-0000").await.unwrap_err();
  assert!(
    matches!(err, Error::ContactNotFoundByPhone(ref phone) if phone == "555-0000")
  );
}

#[tokio::test]
async fn get_missing_list_is_not_found() {
  let (_, lists, _) = services(OnListDelete::SetNull).await;
  let id = Uuid::new_v4();

  let err = lists.get(id).await.unwrap_err();
  assert!(matches!(err, Error::ListNotFound(missing) if missing == id));
}

// ─── Partial update policy ───────────────────────────────────────────────────

#[tokio::test]
async fn update_patches_named_fields_only() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;

  let mut input = june();
  input.phone = Some("555-1234".into());
  input.fax = Some("555-9999".into());
  input.address_id = Some(Uuid::new_v4());
  input.do_not_contact = true;
  let created = contacts.create(input).await.unwrap();

  let patch = ContactPatch {
    first_name: Patch::Set("Junie".into()),
    ..Default::default()
  };
  let updated = contacts.update(created.id, patch).await.unwrap();

  assert_eq!(updated.first_name.as_deref(), Some("Junie"));
  // Patchable fields without a patch keep their stored values.
  assert_eq!(updated.last_name, created.last_name);
  assert_eq!(updated.email, created.email);
  assert_eq!(updated.phone, created.phone);
  assert_eq!(updated.fax, created.fax);
  // The two always-overwritten fields are reset to the payload's values.
  assert_eq!(updated.address_id, None);
  assert!(!updated.do_not_contact);
}

#[tokio::test]
async fn update_can_clear_a_field() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;

  let mut input = june();
  input.fax = Some("555-9999".into());
  let created = contacts.create(input).await.unwrap();

  let patch = ContactPatch { fax: Patch::Clear, ..Default::default() };
  let updated = contacts.update(created.id, patch).await.unwrap();

  assert_eq!(updated.fax, None);
  assert_eq!(updated.first_name, created.first_name);
}

#[tokio::test]
async fn update_missing_contact_is_not_found() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;
  let id = Uuid::new_v4();

  let err = contacts.update(id, ContactPatch::default()).await.unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(missing) if missing == id));
}

#[tokio::test]
async fn list_update_replaces_both_fields() {
  let (_, lists, _) = services(OnListDelete::SetNull).await;

  let created = lists
    .create(ContactListDraft {
      id: None,
      list_name: "Friends".into(),
      user_id: Uuid::new_v4(),
    })
    .await
    .unwrap();

  let new_owner = Uuid::new_v4();
  let updated = lists
    .update(
      created.id,
      ContactListUpdate { list_name: "Close friends".into(), user_id: new_owner },
    )
    .await
    .unwrap();

  assert_eq!(updated.list_name, "Close friends");
  assert_eq!(updated.user_id, new_owner);
}

// ─── Delete contracts ────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_lenient_while_get_stays_strict() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;
  let created = contacts.create(june()).await.unwrap();

  contacts.delete(created.id).await.unwrap();
  assert!(matches!(
    contacts.get(created.id).await.unwrap_err(),
    Error::ContactNotFound(_)
  ));

  // Deleting again, or deleting an id that never existed, still succeeds.
  contacts.delete(created.id).await.unwrap();
  contacts.delete(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn restrict_policy_refuses_populated_list() {
  let (contacts, lists, _) = services(OnListDelete::Restrict).await;

  let list = lists
    .create(ContactListDraft {
      id: None,
      list_name: "Busy".into(),
      user_id: Uuid::new_v4(),
    })
    .await
    .unwrap();

  let mut member = june();
  member.contact_list_id = Some(list.id);
  contacts.create(member).await.unwrap();

  let err = lists.delete(list.id).await.unwrap_err();
  assert!(matches!(err, Error::ListInUse(id) if id == list.id));
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_email_propagates_as_typed_error() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;
  contacts.create(june()).await.unwrap();

  let err = contacts.create(june()).await.unwrap_err();
  assert!(
    matches!(err, Error::DuplicateEmail(ref email) if email == "june@test.com")
  );
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_matches_substring_case_insensitively() {
  let (contacts, _, _) = services(OnListDelete::SetNull).await;

  let anne = contacts
    .create(ContactDraft {
      first_name: Some("Anne".into()),
      email: Some("anne@test.com".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  contacts
    .create(ContactDraft {
      first_name: Some("Bob".into()),
      email: Some("bob@test.com".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  let hits = contacts.search_by_name("ann").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].id, anne.id);
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn mutations_publish_change_events() {
  let (contacts, _, events) = services(OnListDelete::SetNull).await;
  let mut rx = events.subscribe();

  let created = contacts.create(june()).await.unwrap();
  contacts
    .update(created.id, ContactPatch::default())
    .await
    .unwrap();
  contacts.delete(created.id).await.unwrap();

  assert!(matches!(
    rx.try_recv().unwrap(),
    ChangeEvent::ContactCreated { contact } if contact.id == created.id
  ));
  assert!(matches!(
    rx.try_recv().unwrap(),
    ChangeEvent::ContactUpdated { contact } if contact.id == created.id
  ));
  assert!(matches!(
    rx.try_recv().unwrap(),
    ChangeEvent::ContactDeleted { id } if id == created.id
  ));
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[tokio::test]
async fn list_and_contact_lifecycle() {
  let (contacts, lists, _) = services(OnListDelete::SetNull).await;
  let owner = Uuid::new_v4();

  let friends = lists
    .create(ContactListDraft {
      id: None,
      list_name: "Friends".into(),
      user_id: owner,
    })
    .await
    .unwrap();

  let mut draft = june();
  draft.contact_list_id = Some(friends.id);
  let created = contacts.create(draft).await.unwrap();
  assert_eq!(created.email.as_deref(), Some("june@test.com"));

  let members = contacts.get_all_by_list(friends.id).await.unwrap();
  assert_eq!(members.len(), 1);
  assert_eq!(members[0].id, created.id);

  let by_user = contacts.get_all_by_user(owner).await.unwrap();
  assert_eq!(by_user.len(), 1);

  let patch = ContactPatch {
    phone: Patch::Set("555-0000".into()),
    ..Default::default()
  };
  let updated = contacts.update(created.id, patch).await.unwrap();
  assert_eq!(updated.first_name.as_deref(), Some("June"));
  assert_eq!(updated.phone.as_deref(), Some("555-0000"));

  contacts.delete(created.id).await.unwrap();
  assert!(matches!(
    contacts.get(created.id).await.unwrap_err(),
    Error::ContactNotFound(_)
  ));
  assert!(contacts.get_all_by_list(friends.id).await.unwrap().is_empty());
}
