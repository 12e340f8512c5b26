use tauri::{AppHandle, State};

use crate::feed::{spawn_connection, ConnectionState, FeedSnapshot, LiveFeed};

/// Flip the live connection: connect when idle, disconnect when active.
///
/// Returns the state the toggle moved toward so the control can flip its
/// affordance immediately; the definitive transitions arrive as
/// `feed:status` events from the connection task.
#[tauri::command]
pub fn feed_toggle(app: AppHandle, feed: State<'_, LiveFeed>) -> Result<ConnectionState, String> {
    if feed.request_disconnect() {
        return Ok(ConnectionState::Disconnected);
    }
    match feed.begin_connect() {
        Some((close_rx, generation)) => {
            spawn_connection(app, &feed, close_rx, generation);
            Ok(ConnectionState::Connecting)
        }
        // The slot was claimed between the two calls; treat as already active.
        None => Ok(feed.connection()),
    }
}

#[tauri::command]
pub fn feed_clear(feed: State<'_, LiveFeed>) -> Result<FeedSnapshot, String> {
    Ok(feed.clear())
}

#[tauri::command]
pub fn feed_snapshot(feed: State<'_, LiveFeed>) -> Result<FeedSnapshot, String> {
    Ok(feed.snapshot())
}
