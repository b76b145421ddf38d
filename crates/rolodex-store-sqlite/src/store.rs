//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`] and
//! [`ContactListStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rolodex_core::{
  contact::{Contact, ContactDraft},
  list::{ContactList, ContactListDraft, OnListDelete},
  store::{ContactListStore, ContactStore},
};

use crate::{
  Error, Result,
  encode::{
    RawContact, RawContactList, encode_dt, encode_opt_uuid, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Column lists and row readers ────────────────────────────────────────────

const CONTACT_COLUMNS: &str = "contact_id, contact_list_id, first_name, \
   last_name, preferred_name, email, phone, fax, address_id, \
   do_not_contact, created_at";

/// Same columns, qualified for joins against the `contacts c` alias.
const CONTACT_COLUMNS_C: &str = "c.contact_id, c.contact_list_id, \
   c.first_name, c.last_name, c.preferred_name, c.email, c.phone, c.fax, \
   c.address_id, c.do_not_contact, c.created_at";

const LIST_COLUMNS: &str = "list_id, list_name, user_id, created_at";

fn read_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContact> {
  Ok(RawContact {
    contact_id:      row.get(0)?,
    contact_list_id: row.get(1)?,
    first_name:      row.get(2)?,
    last_name:       row.get(3)?,
    preferred_name:  row.get(4)?,
    email:           row.get(5)?,
    phone:           row.get(6)?,
    fax:             row.get(7)?,
    address_id:      row.get(8)?,
    do_not_contact:  row.get(9)?,
    created_at:      row.get(10)?,
  })
}

fn read_list(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContactList> {
  Ok(RawContactList {
    list_id:    row.get(0)?,
    list_name:  row.get(1)?,
    user_id:    row.get(2)?,
    created_at: row.get(3)?,
  })
}

fn unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

/// Translate an insert/save failure, attributing unique-index trips to the
/// email column (the only unique index on `contacts`).
fn duplicate_or_db(e: tokio_rusqlite::Error, email: Option<String>) -> Error {
  if unique_violation(&e) {
    Error::DuplicateEmail(email.unwrap_or_default())
  } else {
    Error::Database(e)
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Query helpers ─────────────────────────────────────────────────────────

  async fn select_contact(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params_from_iter(params.iter()),
              read_contact,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn select_contacts(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), read_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn select_lists(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<ContactList>> {
    let raws: Vec<RawContactList> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), read_list)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContactList::into_list).collect()
  }

  /// Insert a fully-built [`Contact`] into the `contacts` table.
  async fn insert_contact(&self, contact: &Contact) -> Result<()> {
    let id_str         = encode_uuid(contact.id);
    let list_str       = encode_opt_uuid(contact.contact_list_id);
    let first_name     = contact.first_name.clone();
    let last_name      = contact.last_name.clone();
    let preferred_name = contact.preferred_name.clone();
    let email          = contact.email.clone();
    let phone          = contact.phone.clone();
    let fax            = contact.fax.clone();
    let address_str    = encode_opt_uuid(contact.address_id);
    let do_not_contact = contact.do_not_contact;
    let created_str    = encode_dt(contact.created_at);

    let email_for_err = contact.email.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, contact_list_id, first_name, last_name,
             preferred_name, email, phone, fax, address_id,
             do_not_contact, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            list_str,
            first_name,
            last_name,
            preferred_name,
            email,
            phone,
            fax,
            address_str,
            do_not_contact,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| duplicate_or_db(e, email_for_err))?;
    Ok(())
  }

}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
    self
      .select_contact(
        format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"),
        vec![encode_uuid(id)],
      )
      .await
  }

  async fn get_contact_by_email(&self, email: &str) -> Result<Option<Contact>> {
    self
      .select_contact(
        format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE email = ?1"),
        vec![email.to_owned()],
      )
      .await
  }

  async fn get_contact_by_phone(&self, phone: &str) -> Result<Option<Contact>> {
    self
      .select_contact(
        format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE phone = ?1"),
        vec![phone.to_owned()],
      )
      .await
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    self
      .select_contacts(
        format!("SELECT {CONTACT_COLUMNS} FROM contacts"),
        vec![],
      )
      .await
  }

  async fn list_contacts_by_list(&self, list_id: Uuid) -> Result<Vec<Contact>> {
    self
      .select_contacts(
        format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_list_id = ?1"
        ),
        vec![encode_uuid(list_id)],
      )
      .await
  }

  async fn list_contacts_by_user(&self, user_id: Uuid) -> Result<Vec<Contact>> {
    self
      .select_contacts(
        format!(
          "SELECT {CONTACT_COLUMNS_C}
           FROM contacts c
           JOIN contact_lists l ON c.contact_list_id = l.list_id
           WHERE l.user_id = ?1"
        ),
        vec![encode_uuid(user_id)],
      )
      .await
  }

  async fn search_contacts_by_name(&self, fragment: &str) -> Result<Vec<Contact>> {
    // One row per record: a contact matching several name fields is still
    // a single row of this table.
    let pattern = format!("%{fragment}%");
    self
      .select_contacts(
        format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts
           WHERE LOWER(first_name)     LIKE LOWER(?1)
              OR LOWER(last_name)      LIKE LOWER(?1)
              OR LOWER(preferred_name) LIKE LOWER(?1)"
        ),
        vec![pattern],
      )
      .await
  }

  async fn create_contact(&self, draft: ContactDraft) -> Result<Contact> {
    let contact = Contact {
      id:              draft.id.unwrap_or_else(Uuid::new_v4),
      contact_list_id: draft.contact_list_id,
      first_name:      draft.first_name,
      last_name:       draft.last_name,
      preferred_name:  draft.preferred_name,
      email:           draft.email,
      phone:           draft.phone,
      fax:             draft.fax,
      address_id:      draft.address_id,
      do_not_contact:  draft.do_not_contact,
      created_at:      Utc::now(),
    };

    self.insert_contact(&contact).await?;
    Ok(contact)
  }

  async fn save_contact(&self, contact: &Contact) -> Result<()> {
    let id_str         = encode_uuid(contact.id);
    let list_str       = encode_opt_uuid(contact.contact_list_id);
    let first_name     = contact.first_name.clone();
    let last_name      = contact.last_name.clone();
    let preferred_name = contact.preferred_name.clone();
    let email          = contact.email.clone();
    let phone          = contact.phone.clone();
    let fax            = contact.fax.clone();
    let address_str    = encode_opt_uuid(contact.address_id);
    let do_not_contact = contact.do_not_contact;

    let email_for_err = contact.email.clone();

    // created_at is immutable and deliberately left out of the SET list.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE contacts SET
             contact_list_id = ?2, first_name = ?3, last_name = ?4,
             preferred_name = ?5, email = ?6, phone = ?7, fax = ?8,
             address_id = ?9, do_not_contact = ?10
           WHERE contact_id = ?1",
          rusqlite::params![
            id_str,
            list_str,
            first_name,
            last_name,
            preferred_name,
            email,
            phone,
            fax,
            address_str,
            do_not_contact,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| duplicate_or_db(e, email_for_err))?;
    Ok(())
  }

  async fn delete_contact(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactListStore impl ───────────────────────────────────────────────────

impl ContactListStore for SqliteStore {
  type Error = Error;

  async fn get_contact_list(&self, id: Uuid) -> Result<Option<ContactList>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawContactList> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {LIST_COLUMNS} FROM contact_lists WHERE list_id = ?1"
              ),
              rusqlite::params![id_str],
              read_list,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContactList::into_list).transpose()
  }

  async fn list_contact_lists(&self) -> Result<Vec<ContactList>> {
    self
      .select_lists(format!("SELECT {LIST_COLUMNS} FROM contact_lists"), vec![])
      .await
  }

  async fn list_contact_lists_by_user(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<ContactList>> {
    self
      .select_lists(
        format!("SELECT {LIST_COLUMNS} FROM contact_lists WHERE user_id = ?1"),
        vec![encode_uuid(user_id)],
      )
      .await
  }

  async fn create_contact_list(
    &self,
    draft: ContactListDraft,
  ) -> Result<ContactList> {
    let list = ContactList {
      id:         draft.id.unwrap_or_else(Uuid::new_v4),
      list_name:  draft.list_name,
      user_id:    draft.user_id,
      created_at: Utc::now(),
    };

    let id_str      = encode_uuid(list.id);
    let name        = list.list_name.clone();
    let user_str    = encode_uuid(list.user_id);
    let created_str = encode_dt(list.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contact_lists (list_id, list_name, user_id, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, user_str, created_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(list)
  }

  async fn save_contact_list(&self, list: &ContactList) -> Result<()> {
    let id_str   = encode_uuid(list.id);
    let name     = list.list_name.clone();
    let user_str = encode_uuid(list.user_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE contact_lists SET list_name = ?2, user_id = ?3
           WHERE list_id = ?1",
          rusqlite::params![id_str, name, user_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_contact_list(
    &self,
    id: Uuid,
    policy: OnListDelete,
  ) -> Result<()> {
    let id_str = encode_uuid(id);
    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        match policy {
          OnListDelete::Cascade => {
            tx.execute(
              "DELETE FROM contacts WHERE contact_list_id = ?1",
              rusqlite::params![id_str],
            )?;
          }
          OnListDelete::SetNull => {
            tx.execute(
              "UPDATE contacts SET contact_list_id = NULL
               WHERE contact_list_id = ?1",
              rusqlite::params![id_str],
            )?;
          }
          OnListDelete::Restrict => {
            let members: i64 = tx.query_row(
              "SELECT COUNT(*) FROM contacts WHERE contact_list_id = ?1",
              rusqlite::params![id_str],
              |row| row.get(0),
            )?;
            if members > 0 {
              return Ok(false);
            }
          }
        }
        tx.execute(
          "DELETE FROM contact_lists WHERE list_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;
    if !deleted {
      return Err(Error::ListInUse(id));
    }
    Ok(())
  }
}
