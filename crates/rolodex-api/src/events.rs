//! Change-event side channel: an in-process broadcast bus plus the
//! `GET /events` websocket handler that streams each event as a JSON text
//! frame.
//!
//! Publishing is fire-and-forget. A bus with no subscribers drops events
//! silently; a slow subscriber lags and skips rather than backpressuring
//! the service layer.

use axum::{
  extract::{
    State, WebSocketUpgrade,
    ws::{Message, WebSocket},
  },
  response::Response,
};
use rolodex_core::{
  event::ChangeEvent,
  store::{ContactListStore, ContactStore},
};
use tokio::sync::broadcast;

use crate::ApiState;

// ─── Bus ─────────────────────────────────────────────────────────────────────

/// Cheap-to-clone handle on the broadcast channel.
#[derive(Clone)]
pub struct EventBus {
  tx: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
  pub fn new(capacity: usize) -> Self {
    let (tx, _) = broadcast::channel(capacity);
    Self { tx }
  }

  /// Publish an event. Never blocks and never fails: no subscribers is not
  /// an error.
  pub fn publish(&self, event: ChangeEvent) {
    let _ = self.tx.send(event);
  }

  pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
    self.tx.subscribe()
  }
}

impl Default for EventBus {
  fn default() -> Self { Self::new(64) }
}

// ─── Websocket handler ───────────────────────────────────────────────────────

/// `GET /events` — upgrade to a websocket and stream change events.
pub async fn subscribe<S>(
  State(state): State<ApiState<S>>,
  ws: WebSocketUpgrade,
) -> Response
where
  S: ContactStore + ContactListStore + 'static,
{
  let rx = state.events.subscribe();
  ws.on_upgrade(move |socket| stream_events(socket, rx))
}

async fn stream_events(
  mut socket: WebSocket,
  mut rx: broadcast::Receiver<ChangeEvent>,
) {
  loop {
    match rx.recv().await {
      Ok(event) => {
        let Ok(text) = serde_json::to_string(&event) else {
          continue;
        };
        if socket.send(Message::Text(text.into())).await.is_err() {
          // Client went away.
          break;
        }
      }
      Err(broadcast::error::RecvError::Lagged(skipped)) => {
        tracing::debug!("event subscriber lagged, skipped {skipped} events");
      }
      Err(broadcast::error::RecvError::Closed) => break,
    }
  }
}
