pub mod buffer;
pub mod commands;
pub mod config;
pub mod events;
pub mod feed;
pub mod gateway;
pub mod poller;
pub mod toast;
pub mod types;

use tracing_subscriber::EnvFilter;

/// Initialize structured logging with tracing.
/// Respects RUST_LOG env var; defaults to `info` level for jetdash crate.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jetdash=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    // Load .env from the crate root.
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    dotenvy::from_path(manifest_dir.join(".env")).ok();

    let gateway = gateway::Gateway::from_env();
    tracing::info!("Gateway base URL: {}", gateway.base());

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(gateway.clone())
        .manage(feed::LiveFeed::new())
        .setup(move |app| {
            poller::spawn_health_poller(app.handle().clone(), gateway);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::server::server_info,
            commands::streams::streams_list,
            commands::streams::stream_create,
            commands::streams::stream_delete,
            commands::consumers::consumers_list,
            commands::consumers::consumer_create,
            commands::consumers::consumer_delete,
            commands::publish::message_publish,
            commands::feed::feed_toggle,
            commands::feed::feed_clear,
            commands::feed::feed_snapshot,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
