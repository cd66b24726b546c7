use crate::api::ApiClient;
use crate::app::App;
use tracing::{debug, info};

use super::action_queue::{Action, ActionTx};

pub(super) fn run_action(action: Action, app: &mut App, client: &ApiClient, action_tx: &ActionTx) {
    match action {
        Action::LoadDoctors => {
            spawn_fetch(client, action_tx);
        }
        Action::RetryLoad => {
            if app.begin_retry() {
                info!("retrying doctor listing load");
                spawn_fetch(client, action_tx);
            } else {
                app.set_status("Nothing to retry".to_string());
            }
        }
        Action::DoctorsLoaded(result) => {
            app.apply_load_result(result);
        }
    }
}

/// Fetch on a background task; the result comes back as `DoctorsLoaded`.
fn spawn_fetch(client: &ApiClient, action_tx: &ActionTx) {
    let client = client.clone();
    let action_tx = action_tx.clone();
    debug!(source = %client.source_label(), "spawning doctor listing fetch");

    tokio::spawn(async move {
        let result = client.fetch_doctors().await;
        let _ = action_tx.send(Action::DoctorsLoaded(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::action_queue::channel;
    use doctor_directory::{DirectoryFetchError, FetchFailure, LoadState, MemoryLocation};

    #[tokio::test]
    async fn load_round_trips_through_queue() {
        let mut app = App::new(MemoryLocation::default(), "dev");
        let client = ApiClient::dev();
        let (tx, mut rx) = channel();

        run_action(Action::LoadDoctors, &mut app, &client, &tx);
        let loaded = rx.recv().await.expect("fetch result");
        run_action(loaded, &mut app, &client, &tx);

        assert_eq!(app.session.load_state(), &LoadState::Loaded);
        assert!(!app.session.visible().is_empty());
    }

    #[tokio::test]
    async fn retry_is_ignored_unless_failed() {
        let mut app = App::new(MemoryLocation::default(), "dev");
        let client = ApiClient::dev();
        let (tx, mut rx) = channel();

        run_action(Action::RetryLoad, &mut app, &client, &tx);
        assert!(rx.try_recv().is_err());
        assert_eq!(app.status_message.as_deref(), Some("Nothing to retry"));

        run_action(
            Action::DoctorsLoaded(Err(FetchFailure {
                error: DirectoryFetchError::Network("connection refused".to_string()),
                attempts: 3,
            })),
            &mut app,
            &client,
            &tx,
        );
        run_action(Action::RetryLoad, &mut app, &client, &tx);
        assert!(app.is_loading());

        let loaded = rx.recv().await.expect("fetch result");
        run_action(loaded, &mut app, &client, &tx);
        assert_eq!(app.session.load_state(), &LoadState::Loaded);
    }
}
