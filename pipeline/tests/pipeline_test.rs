//! End-to-end runs of [`pipeline::Pipeline`] over an in-memory store, a keyed LLM and a recording bot.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{fixture, group_message, seeded_store, KeyedLlm, MockBot, Sent};
use digest_core::{Chat, Window};
use pipeline::{aggregate, notices, GroupBy, RunError};
use storage::{ConversationRow, MessageStore, NewMessage, PersistenceError};

/// **Test: a failed analysis for one conversation does not stop the next one.**
#[tokio::test]
async fn test_failure_isolation_between_conversations() {
    let store = seeded_store(&[
        group_message(1, "Alpha", "alpha-1", 0),
        group_message(2, "Beta", "beta-1", 0),
        group_message(1, "Alpha", "alpha-2", 0),
    ])
    .await;
    let f = fixture(store, KeyedLlm::failing_on("alpha"), MockBot::new()).await;
    let requester = Chat::private(42);

    let report = f.pipeline.run(&requester, Window::days(1)).await.unwrap();

    assert_eq!(report.failed, vec!["Alpha"]);
    assert_eq!(report.delivered, vec!["Beta"]);

    assert_eq!(
        std::fs::read_to_string(f.artifact("Alpha.txt")).unwrap(),
        "alpha-1\nalpha-2"
    );
    assert!(!f.artifact("Alpha_analysis.txt").exists());
    assert_eq!(
        std::fs::read_to_string(f.artifact("Beta_analysis.txt")).unwrap(),
        "report for: beta-1"
    );

    assert_eq!(
        f.bot.messages_to(42),
        vec![
            notices::conversation_failed("Alpha"),
            notices::RUN_SUMMARY.to_string()
        ]
    );
    assert_eq!(f.bot.documents_to(42), vec![f.artifact("Beta_analysis.txt")]);
}

/// **Test: Team messages older than the window are left out; only Ops is analyzed.**
#[tokio::test]
async fn test_window_scenario_team_and_ops() {
    let messages = vec![
        group_message(10, "Team", "team-3d", 3),
        group_message(10, "Team", "team-2d-a", 2),
        group_message(10, "Team", "team-2d-b", 2),
        group_message(20, "Ops", "ops-yesterday", 1),
    ];
    let store = seeded_store(&messages).await;

    let rows = store.query_by_window(1).await.unwrap();
    let groups = aggregate(&rows, GroupBy::Title);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups["Ops"], vec!["ops-yesterday"]);

    let f = fixture(store, KeyedLlm::ok(), MockBot::new()).await;
    let report = f.pipeline.run(&Chat::private(7), Window::days(1)).await.unwrap();

    assert_eq!(report.delivered, vec!["Ops"]);
    assert!(f.artifact("Ops_analysis.txt").exists());
    assert!(!f.artifact("Team.txt").exists());
}

/// **Test: an all-time window sees every conversation.**
#[tokio::test]
async fn test_all_time_window() {
    let store = seeded_store(&[
        group_message(10, "Team", "old", 30),
        group_message(20, "Ops", "new", 0),
    ])
    .await;
    let f = fixture(store, KeyedLlm::ok(), MockBot::new()).await;

    let report = f.pipeline.run(&Chat::private(7), Window::ALL_TIME).await.unwrap();

    assert_eq!(report.conversations(), 2);
    assert_eq!(f.bot.documents_to(7).len(), 2);
}

/// **Test: an empty window still ends with the summary notice.**
#[tokio::test]
async fn test_empty_window_sends_summary() {
    let store = seeded_store(&[]).await;
    let llm = KeyedLlm::ok();
    let f = fixture(store, llm.clone(), MockBot::new()).await;

    let report = f.pipeline.run(&Chat::private(7), Window::days(3)).await.unwrap();

    assert_eq!(report.conversations(), 0);
    assert_eq!(*llm.calls.lock().unwrap(), 0);
    assert_eq!(f.bot.sent(), vec![Sent::Message(7, notices::RUN_SUMMARY.to_string())]);
}

/// **Test: delivery failure is reported as a failed conversation and the run goes on.**
#[tokio::test]
async fn test_delivery_failure_is_conversation_scoped() {
    let store = seeded_store(&[
        group_message(1, "Alpha", "a", 0),
        group_message(2, "Beta", "b", 0),
    ])
    .await;
    let f = fixture(store, KeyedLlm::ok(), MockBot::failing_documents_for(&[9])).await;

    let report = f.pipeline.run(&Chat::private(9), Window::days(1)).await.unwrap();

    assert_eq!(report.failed, vec!["Alpha", "Beta"]);
    assert!(f.artifact("Alpha_analysis.txt").exists());
    assert_eq!(f.bot.messages_to(9).last().unwrap(), notices::RUN_SUMMARY);
}

struct BrokenStore;

#[async_trait]
impl MessageStore for BrokenStore {
    async fn append(&self, _message: &NewMessage) -> Result<i64, PersistenceError> {
        Err(PersistenceError::InvalidUrl("closed".to_string()))
    }

    async fn query_by_window(&self, _days: u32) -> Result<Vec<ConversationRow>, PersistenceError> {
        Err(PersistenceError::InvalidUrl("closed".to_string()))
    }

    async fn close(&self) {}
}

/// **Test: a query failure tells the requester and aborts the run without a summary.**
#[tokio::test]
async fn test_query_failure_aborts_run() {
    let llm = KeyedLlm::ok();
    let f = fixture(Arc::new(BrokenStore), llm.clone(), MockBot::new()).await;

    let result = f.pipeline.run(&Chat::private(3), Window::days(1)).await;

    assert!(matches!(result, Err(RunError::Persistence(_))));
    assert_eq!(f.bot.messages_to(3), vec![notices::QUERY_FAILED.to_string()]);
    assert_eq!(*llm.calls.lock().unwrap(), 0);
}
