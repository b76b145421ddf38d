//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, booleans as SQLite integers.

use chrono::{DateTime, Utc};
use rolodex_core::{contact::Contact, list::ContactList};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_opt_uuid(id: Option<Uuid>) -> Option<String> {
  id.map(encode_uuid)
}

pub fn decode_opt_uuid(s: Option<&str>) -> Result<Option<Uuid>> {
  s.map(decode_uuid).transpose()
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id:      String,
  pub contact_list_id: Option<String>,
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub preferred_name:  Option<String>,
  pub email:           Option<String>,
  pub phone:           Option<String>,
  pub fax:             Option<String>,
  pub address_id:      Option<String>,
  pub do_not_contact:  bool,
  pub created_at:      String,
}

impl RawContact {
  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:              decode_uuid(&self.contact_id)?,
      contact_list_id: decode_opt_uuid(self.contact_list_id.as_deref())?,
      first_name:      self.first_name,
      last_name:       self.last_name,
      preferred_name:  self.preferred_name,
      email:           self.email,
      phone:           self.phone,
      fax:             self.fax,
      address_id:      decode_opt_uuid(self.address_id.as_deref())?,
      do_not_contact:  self.do_not_contact,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `contact_lists` row.
pub struct RawContactList {
  pub list_id:    String,
  pub list_name:  String,
  pub user_id:    String,
  pub created_at: String,
}

impl RawContactList {
  pub fn into_list(self) -> Result<ContactList> {
    Ok(ContactList {
      id:         decode_uuid(&self.list_id)?,
      list_name:  self.list_name,
      user_id:    decode_uuid(&self.user_id)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
