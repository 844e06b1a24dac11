use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use rbc::api::RoomServiceApi;
use rbc::core::RbcConfig;
use rbc::rooms::StatusPoller;
use rbc::session::SessionStore;
use rbc::storage::LocalStore;
use rbc::welcome;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let run_mode = env::var("RBC_MODE").unwrap_or_else(|_| "development".into());
    let config = RbcConfig::new_config(&run_mode).unwrap_or_else(|err| panic!("Missing needed config: {}", err));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    welcome();

    let room_id = match env::args().nth(1) {
        Some(id) => id,
        None => {
            eprintln!("Usage: rbc <room-id>");
            process::exit(2);
        }
    };

    let storage = Arc::new(
        LocalStore::open(config.storage_path())
            .unwrap_or_else(|err| panic!("Unable to open local storage: {}", err)),
    );
    let mut api = RoomServiceApi::from_config(&config)
        .unwrap_or_else(|err| panic!("Invalid room service url: {}", err));

    let session = SessionStore::new(storage.clone(), api.clone());
    if let Some(token) = session.auth_token() {
        api = api.with_token(token);
    }

    let poller = StatusPoller::start(
        api,
        room_id.clone(),
        Duration::from_secs(config.poll_interval_secs),
        Some(Arc::new(|id: &str| error!("Room {id} no longer exists on the server."))),
    );

    info!("Watching join status for room {room_id}, refreshing every {}s.", config.poll_interval_secs);

    let mut updates = WatchStream::new(poller.subscribe());
    loop {
        tokio::select! {
            update = updates.next() => {
                match update {
                    Some(Some(status)) => info!("Join status for room {room_id}: {}", status.to_str()),
                    Some(None) => {} //nothing fetched yet
                    None => break, //poller stopped, the room is gone
                }
            }
            _ = tokio::signal::ctrl_c() => {
                poller.stop();
                break;
            }
        }
    }
    info!("Stopping room watcher...");
}
