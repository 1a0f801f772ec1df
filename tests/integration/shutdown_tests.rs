use std::time::Duration;

use async_trait::async_trait;
use mvi_store::{CommandHandler, Intent, NoCommands, Reducer, Store};
use tokio::time::timeout;

use super::{
    await_state, await_termination, DocumentAction, DocumentCommand, DocumentReducer,
    DocumentState,
};

#[tokio::test]
async fn given_a_shut_down_store_should_ignore_further_dispatches() {
    let store = Store::spawn(
        DocumentState::default(),
        DocumentReducer,
        NoCommands::new(),
    );

    store.shutdown();
    await_termination(&store).await;
    assert!(!store.sender().is_connected());

    // Replay of the last state still works; nothing new ever arrives.
    let mut states = store.subscribe_state();
    assert_eq!(states.next().await.unwrap(), DocumentState::default());

    store.dispatch_action(DocumentAction::LoadStarted);
    assert!(timeout(Duration::from_millis(150), states.next())
        .await
        .is_err());
    assert_eq!(store.state(), DocumentState::default());
}

/// Handler whose result arrives well after the store is gone.
struct SlowFail;

#[async_trait]
impl CommandHandler for SlowFail {
    type Action = DocumentAction;
    type Command = DocumentCommand;

    async fn run(&self, _command: DocumentCommand) -> Intent<DocumentAction, DocumentCommand> {
        tokio::time::sleep(Duration::from_millis(80)).await;
        Intent::Action(DocumentAction::Failed {
            message: "late".to_string(),
        })
    }
}

#[tokio::test]
async fn given_shutdown_with_commands_in_flight_should_drop_their_results() {
    let store = Store::spawn(DocumentState::default(), DocumentReducer, SlowFail);

    store.dispatch_command(DocumentCommand::LoadDocument {
        id: "doc1".to_string(),
    });
    tokio::time::sleep(Duration::from_millis(10)).await; // let the command start
    store.shutdown();
    await_termination(&store).await;

    // Well past the command's latency: its result must not have landed.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(store.state(), DocumentState::default());
}

#[tokio::test]
async fn given_a_dropped_store_should_disconnect_senders() {
    let sender = {
        let store = Store::spawn(
            DocumentState::default(),
            DocumentReducer,
            NoCommands::new(),
        );
        store.sender()
    };

    timeout(Duration::from_secs(2), async {
        while sender.is_connected() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("dispatch loop should stop after drop");

    // Silent no-op, not a panic.
    sender.dispatch_action(DocumentAction::LoadStarted);
}

#[derive(Debug, Clone)]
struct Bump;

struct SlowTally;

impl Reducer for SlowTally {
    type State = u32;
    type Action = Bump;
    type Effect = ();

    fn reduce(&self, _action: Bump, state: &u32) -> (u32, Vec<()>) {
        // Slow enough that shutdown lands while intents are still queued.
        std::thread::sleep(Duration::from_millis(50));
        (state + 1, Vec::new())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_shutdown_should_drop_queued_intents_not_drain_them() {
    let store = Store::spawn(0u32, SlowTally, NoCommands::new());
    let mut states = store.subscribe_state();

    for _ in 0..5 {
        store.dispatch_action(Bump);
    }
    // First reduction has landed; the rest are still queued.
    await_state(&mut states, |state| *state >= 1).await;

    store.shutdown();
    await_termination(&store).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(
        store.state() < 5,
        "queued intents must be dropped, not drained"
    );
}
