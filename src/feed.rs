use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Runtime};
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::protocol::Message;

use crate::buffer::EventBuffer;
use crate::events::{emit_event, event_names};
use crate::toast::{self, Toast, ToastKind};
use crate::types::event::LiveEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Transition inputs for the feed state machine, one per transport callback.
#[derive(Debug)]
pub enum FeedInput {
    Open,
    Message(String),
    Close,
    Error(String),
}

/// Effects produced by applying a [`FeedInput`]; the websocket task turns
/// these into Tauri events and toasts.
#[derive(Debug)]
pub enum FeedUpdate {
    Status(ConnectionState),
    Event { event: LiveEvent, total: u64 },
    Notice(Toast),
}

/// Render-ready view of the feed for the webview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub connection: ConnectionState,
    pub total: u64,
    pub events: Vec<LiveEvent>,
}

/// Payload of a `feed:event` emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEventPayload {
    pub event: LiveEvent,
    pub total: u64,
}

/// Connection state plus the bounded event buffer, behind one mutex.
///
/// The websocket task is the sole writer; `clear` and `snapshot` commands
/// take the same lock, so render never observes a half-applied mutation.
#[derive(Debug)]
pub struct FeedShared {
    connection: ConnectionState,
    buffer: EventBuffer,
}

impl FeedShared {
    fn new() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            buffer: EventBuffer::new(),
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// Apply one transition input, returning the effects to render.
    ///
    /// `received_at` is the receipt timestamp used when a payload carries no
    /// `timestamp` of its own.
    pub fn apply(&mut self, input: FeedInput, received_at: &str) -> Vec<FeedUpdate> {
        match input {
            FeedInput::Open => {
                self.connection = ConnectionState::Connected;
                vec![
                    FeedUpdate::Status(ConnectionState::Connected),
                    FeedUpdate::Notice(Toast {
                        message: "Live feed connected".to_string(),
                        kind: ToastKind::Success,
                    }),
                ]
            }
            FeedInput::Message(text) => match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(value) => {
                    let event = LiveEvent::from_payload(value, received_at);
                    self.buffer.record(event.clone());
                    vec![FeedUpdate::Event {
                        event,
                        total: self.buffer.total(),
                    }]
                }
                Err(e) => {
                    // Malformed payloads are dropped; the connection stays up.
                    tracing::warn!("Dropping malformed live-feed payload: {}", e);
                    Vec::new()
                }
            },
            FeedInput::Close => {
                self.connection = ConnectionState::Disconnected;
                vec![FeedUpdate::Status(ConnectionState::Disconnected)]
            }
            FeedInput::Error(detail) => vec![FeedUpdate::Notice(Toast {
                message: format!("Live feed error: {}", detail),
                kind: ToastKind::Error,
            })],
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            connection: self.connection,
            total: self.buffer.total(),
            events: self.buffer.snapshot(),
        }
    }
}

/// Managed handle for the single live-feed connection.
///
/// One instance per dashboard session, registered as Tauri state. At most one
/// connection task is active at a time: `begin_connect` claims the connection
/// slot under lock and refuses while it is occupied.
pub struct LiveFeed {
    shared: Arc<Mutex<FeedShared>>,
    slot: Arc<Mutex<ConnectionSlot>>,
}

/// Close handle for the active connection task, tagged with a generation so a
/// task that outlives its own disconnect cannot touch a successor's slot.
#[derive(Default)]
struct ConnectionSlot {
    close_tx: Option<oneshot::Sender<()>>,
    generation: u64,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(FeedShared::new())),
            slot: Arc::new(Mutex::new(ConnectionSlot::default())),
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.shared.lock().unwrap().connection()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.shared.lock().unwrap().snapshot()
    }

    /// Empty the buffer and reset the lifetime counter without touching the
    /// connection.
    pub fn clear(&self) -> FeedSnapshot {
        let mut shared = self.shared.lock().unwrap();
        shared.buffer.clear();
        shared.snapshot()
    }

    /// Claim the connection slot and move to `Connecting`.
    ///
    /// Returns the close receiver and generation for the new connection task,
    /// or `None` when a connection is already active (the caller should
    /// disconnect instead).
    pub fn begin_connect(&self) -> Option<(oneshot::Receiver<()>, u64)> {
        let mut slot = self.slot.lock().unwrap();
        if slot.close_tx.is_some() {
            return None;
        }
        let (tx, rx) = oneshot::channel();
        slot.close_tx = Some(tx);
        slot.generation += 1;
        self.shared.lock().unwrap().connection = ConnectionState::Connecting;
        Some((rx, slot.generation))
    }

    /// Signal the active connection task to close. Returns `false` when no
    /// connection is active.
    pub fn request_disconnect(&self) -> bool {
        match self.slot.lock().unwrap().close_tx.take() {
            Some(tx) => {
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }

    fn shared(&self) -> Arc<Mutex<FeedShared>> {
        self.shared.clone()
    }

    fn connection_slot(&self) -> Arc<Mutex<ConnectionSlot>> {
        self.slot.clone()
    }
}

/// Release the slot held by the task for `generation`. Returns `false` when a
/// newer connection has claimed the slot in the meantime, in which case the
/// caller must not touch shared state on its way out.
fn release_connection(slot: &Mutex<ConnectionSlot>, generation: u64) -> bool {
    let mut slot = slot.lock().unwrap();
    if slot.generation != generation {
        return false;
    }
    slot.close_tx.take();
    true
}

impl Default for LiveFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the websocket task for a freshly claimed connection slot.
pub fn spawn_connection<R: Runtime>(
    app: AppHandle<R>,
    feed: &LiveFeed,
    close_rx: oneshot::Receiver<()>,
    generation: u64,
) {
    let shared = feed.shared();
    let slot = feed.connection_slot();
    emit_status(&app, ConnectionState::Connecting);
    tauri::async_runtime::spawn(async move {
        run_connection(&app, &shared, close_rx).await;
        // A stale task must not free a successor's slot or overwrite its
        // connection state.
        if release_connection(&slot, generation) {
            apply_and_emit(&app, &shared, FeedInput::Close);
        }
    });
}

fn apply_and_emit<R: Runtime>(
    app: &AppHandle<R>,
    shared: &Mutex<FeedShared>,
    input: FeedInput,
) {
    let received_at = chrono::Utc::now().to_rfc3339();
    let updates = shared.lock().unwrap().apply(input, &received_at);
    for update in updates {
        match update {
            FeedUpdate::Status(state) => emit_status(app, state),
            FeedUpdate::Event { event, total } => {
                let payload = FeedEventPayload { event, total };
                if let Err(e) = emit_event(app, event_names::FEED_EVENT, payload) {
                    tracing::warn!("Failed to emit feed event: {}", e);
                }
            }
            FeedUpdate::Notice(t) => toast::show(app, t),
        }
    }
}

fn emit_status<R: Runtime>(app: &AppHandle<R>, state: ConnectionState) {
    if let Err(e) = emit_event(app, event_names::FEED_STATUS, state) {
        tracing::warn!("Failed to emit feed status: {}", e);
    }
}

/// Own the websocket stream until it closes, translating transport callbacks
/// into [`FeedInput`]s. No auto-reconnect: the caller applies the final
/// `Close` once the slot is released, and the operator toggles again.
async fn run_connection<R: Runtime>(
    app: &AppHandle<R>,
    shared: &Mutex<FeedShared>,
    mut close_rx: oneshot::Receiver<()>,
) {
    let base = crate::config::gateway_url();
    let url = match crate::config::feed_url(&base) {
        Ok(url) => url,
        Err(e) => {
            apply_and_emit(app, shared, FeedInput::Error(e));
            return;
        }
    };

    tracing::info!("Opening live feed to {}", url);
    let ws = tokio::select! {
        _ = &mut close_rx => {
            // Toggled away while the handshake was in flight.
            return;
        }
        res = tokio_tungstenite::connect_async(url.as_str()) => match res {
            Ok((ws, _response)) => ws,
            Err(e) => {
                apply_and_emit(app, shared, FeedInput::Error(e.to_string()));
                return;
            }
        },
    };

    apply_and_emit(app, shared, FeedInput::Open);
    let (mut write, mut read) = ws.split();

    loop {
        tokio::select! {
            _ = &mut close_rx => {
                let _ = write.close().await;
                break;
            }
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    apply_and_emit(app, shared, FeedInput::Message(text.to_string()));
                }
                Some(Ok(Message::Ping(payload))) => {
                    let _ = write.send(Message::Pong(payload)).await;
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Live feed closed by remote");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    apply_and_emit(app, shared, FeedInput::Error(e.to_string()));
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: &str = "2026-01-15T10:30:00Z";

    fn message(subject: &str) -> FeedInput {
        FeedInput::Message(format!(r#"{{"subject":"{}"}}"#, subject))
    }

    #[test]
    fn open_moves_to_connected_with_notice() {
        let mut shared = FeedShared::new();
        let updates = shared.apply(FeedInput::Open, AT);
        assert_eq!(shared.connection(), ConnectionState::Connected);
        assert!(matches!(
            updates[0],
            FeedUpdate::Status(ConnectionState::Connected)
        ));
        assert!(matches!(
            &updates[1],
            FeedUpdate::Notice(t) if t.kind == ToastKind::Success
        ));
    }

    #[test]
    fn close_moves_to_disconnected() {
        let mut shared = FeedShared::new();
        shared.apply(FeedInput::Open, AT);
        let updates = shared.apply(FeedInput::Close, AT);
        assert_eq!(shared.connection(), ConnectionState::Disconnected);
        assert!(matches!(
            updates[0],
            FeedUpdate::Status(ConnectionState::Disconnected)
        ));
    }

    #[test]
    fn message_records_event_and_counts() {
        let mut shared = FeedShared::new();
        shared.apply(FeedInput::Open, AT);
        shared.apply(message("orders.created"), AT);
        let updates = shared.apply(message("orders.updated"), AT);

        match &updates[0] {
            FeedUpdate::Event { event, total } => {
                assert_eq!(event.subject, "orders.updated");
                assert_eq!(*total, 2);
            }
            other => panic!("Expected Event update, got {:?}", other),
        }

        let snap = shared.snapshot();
        assert_eq!(snap.events[0].subject, "orders.updated");
        assert_eq!(snap.events[1].subject, "orders.created");
        assert_eq!(snap.total, 2);
    }

    #[test]
    fn malformed_payload_is_dropped() {
        let mut shared = FeedShared::new();
        shared.apply(FeedInput::Open, AT);
        let updates = shared.apply(FeedInput::Message("not json {".to_string()), AT);
        assert!(updates.is_empty());
        assert_eq!(shared.connection(), ConnectionState::Connected);
        assert_eq!(shared.snapshot().total, 0);
    }

    #[test]
    fn error_raises_notice_without_changing_state() {
        let mut shared = FeedShared::new();
        shared.apply(FeedInput::Open, AT);
        let updates = shared.apply(FeedInput::Error("broken pipe".to_string()), AT);
        assert_eq!(shared.connection(), ConnectionState::Connected);
        assert!(matches!(
            &updates[0],
            FeedUpdate::Notice(t) if t.kind == ToastKind::Error && t.message.contains("broken pipe")
        ));
    }

    #[test]
    fn buffer_stays_bounded_through_inputs() {
        let mut shared = FeedShared::new();
        shared.apply(FeedInput::Open, AT);
        for i in 1..=205 {
            shared.apply(message(&format!("e{}", i)), AT);
        }
        let snap = shared.snapshot();
        assert_eq!(snap.events.len(), 200);
        assert_eq!(snap.total, 205);
        assert_eq!(snap.events[0].subject, "e205");
        assert_eq!(snap.events[199].subject, "e6");
    }

    #[test]
    fn begin_connect_refuses_second_connection() {
        let feed = LiveFeed::new();
        let first = feed.begin_connect();
        assert!(first.is_some());
        assert_eq!(feed.connection(), ConnectionState::Connecting);
        // The slot is taken: no second connection can start.
        assert!(feed.begin_connect().is_none());
    }

    #[test]
    fn disconnect_frees_slot_for_reconnect() {
        let feed = LiveFeed::new();
        assert!(!feed.request_disconnect());
        let _first = feed.begin_connect().expect("first connect");
        assert!(feed.request_disconnect());
        assert!(!feed.request_disconnect());
        assert!(feed.begin_connect().is_some());
    }

    #[test]
    fn disconnect_signal_reaches_task_receiver() {
        let feed = LiveFeed::new();
        let (mut rx, _gen) = feed.begin_connect().expect("connect");
        assert!(rx.try_recv().is_err());
        assert!(feed.request_disconnect());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn disconnect_resolves_pending_close_future() {
        let feed = LiveFeed::new();
        let (rx, _gen) = feed.begin_connect().expect("connect");
        assert!(feed.request_disconnect());
        assert!(rx.await.is_ok());
    }

    #[test]
    fn stale_task_cannot_release_successor_slot() {
        use tokio::sync::oneshot::error::TryRecvError;

        let feed = LiveFeed::new();
        let (_rx1, gen1) = feed.begin_connect().expect("first connect");
        assert!(feed.request_disconnect());
        // Reconnect lands before the first task finishes winding down.
        let (mut rx2, gen2) = feed.begin_connect().expect("second connect");
        assert_ne!(gen1, gen2);

        // The late cleanup from the first task is a no-op.
        assert!(!release_connection(&feed.slot, gen1));
        assert!(matches!(rx2.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(feed.connection(), ConnectionState::Connecting);
        assert!(feed.begin_connect().is_none());

        // The second task's own cleanup still frees the slot.
        assert!(release_connection(&feed.slot, gen2));
        assert!(feed.begin_connect().is_some());
    }

    #[test]
    fn clear_leaves_connection_alone() {
        let feed = LiveFeed::new();
        {
            let mut shared = feed.shared.lock().unwrap();
            shared.apply(FeedInput::Open, AT);
            shared.apply(message("a"), AT);
        }
        let snap = feed.clear();
        assert_eq!(snap.total, 0);
        assert!(snap.events.is_empty());
        assert_eq!(snap.connection, ConnectionState::Connected);
        // Idempotent.
        let snap = feed.clear();
        assert_eq!(snap.total, 0);
    }

    #[test]
    fn connection_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ConnectionState::Connected).unwrap(),
            "\"connected\""
        );
        assert_eq!(
            serde_json::to_string(&ConnectionState::Disconnected).unwrap(),
            "\"disconnected\""
        );
    }
}
