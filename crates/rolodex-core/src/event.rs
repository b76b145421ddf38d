//! Change notifications published by the service layer after successful
//! mutations.
//!
//! Events are a side channel for external subscribers (e.g. a websocket
//! feed). Publishing must never block or fail a core operation; subscriber
//! success is not the core's concern.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{contact::Contact, list::ContactList};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChangeEvent {
  ContactCreated { contact: Contact },
  ContactUpdated { contact: Contact },
  ContactDeleted { id: Uuid },
  ListCreated { list: ContactList },
  ListUpdated { list: ContactList },
  ListDeleted { id: Uuid },
}
