//! Menu presentation and selections through [`pipeline::TriggerSurface`].

mod common;

use std::sync::Arc;

use common::{fixture, group_message, seeded_store, KeyedLlm, MockBot, Sent};
use digest_core::{Chat, DigestError, HandlerError, SelectionHandler, User, Window, WindowChoice};
use pipeline::{notices, SessionState, TriggerSurface};

fn user(id: i64) -> User {
    User {
        id,
        username: Some("admin".to_string()),
        first_name: None,
    }
}

/// **Test: /start flow sends the three-choice menu and awaits a choice.**
#[tokio::test]
async fn test_present_menu() {
    let store = seeded_store(&[]).await;
    let f = fixture(store, KeyedLlm::ok(), MockBot::new()).await;
    let surface = TriggerSurface::new(f.pipeline.clone(), f.bot.clone(), vec![], false);
    let chat = Chat::private(5);

    surface.present_menu(&chat, &user(5)).await.unwrap();

    assert_eq!(
        f.bot.sent(),
        vec![Sent::Menu(
            5,
            notices::MENU_PROMPT.to_string(),
            WindowChoice::ALL.to_vec()
        )]
    );
    assert_eq!(surface.sessions().state(5), SessionState::AwaitingWindowChoice);
}

/// **Test: a selection runs the pipeline for its window and returns the session to Idle.**
#[tokio::test]
async fn test_selection_runs_pipeline() {
    let store = seeded_store(&[
        group_message(1, "Team", "old", 2),
        group_message(1, "Team", "new", 0),
    ])
    .await;
    let f = fixture(store, KeyedLlm::ok(), MockBot::new()).await;
    let surface = TriggerSurface::new(f.pipeline.clone(), f.bot.clone(), vec![], false);
    let chat = Chat::private(5);

    surface.present_menu(&chat, &user(5)).await.unwrap();
    surface
        .on_selection(&chat, &user(5), "start_analysis_3_days")
        .await
        .unwrap();

    let messages = f.bot.messages_to(5);
    assert_eq!(messages[0], notices::start_notice(Window::days(3)));
    assert_eq!(messages.last().unwrap(), notices::RUN_SUMMARY);
    assert_eq!(
        std::fs::read_to_string(f.artifact("Team.txt")).unwrap(),
        "old\nnew"
    );
    assert_eq!(surface.sessions().state(5), SessionState::Idle);
}

/// **Test: a stale menu (Idle session) still triggers a run.**
#[tokio::test]
async fn test_stale_menu_selection_accepted() {
    let store = seeded_store(&[group_message(1, "Team", "hi", 0)]).await;
    let f = fixture(store, KeyedLlm::ok(), MockBot::new()).await;
    let surface = TriggerSurface::new(f.pipeline.clone(), f.bot.clone(), vec![], false);

    surface
        .on_selection(&Chat::private(8), &user(8), "start_analysis_all_time")
        .await
        .unwrap();

    assert_eq!(f.bot.documents_to(8).len(), 1);
}

/// **Test: a selection while a run is in progress is rejected with a notice.**
#[tokio::test]
async fn test_selection_while_processing() {
    let store = seeded_store(&[group_message(1, "Team", "hi", 0)]).await;
    let llm = KeyedLlm::ok();
    let f = fixture(store, llm.clone(), MockBot::new()).await;
    let surface = TriggerSurface::new(f.pipeline.clone(), f.bot.clone(), vec![], false);
    assert!(surface.sessions().begin_processing(5));

    surface
        .on_selection(&Chat::private(5), &user(5), "start_analysis_1_day")
        .await
        .unwrap();

    assert_eq!(
        f.bot.sent(),
        vec![Sent::Message(5, notices::ALREADY_RUNNING.to_string())]
    );
    assert_eq!(*llm.calls.lock().unwrap(), 0);
}

/// **Test: unknown payloads are ignored.**
#[tokio::test]
async fn test_unknown_payload_ignored() {
    let store = seeded_store(&[]).await;
    let f = fixture(store, KeyedLlm::ok(), MockBot::new()).await;
    let surface = TriggerSurface::new(f.pipeline.clone(), f.bot.clone(), vec![], false);

    surface
        .on_selection(&Chat::private(5), &user(5), "start_analysis_week")
        .await
        .unwrap();

    assert!(f.bot.sent().is_empty());
}

/// **Test: with the admins-only option, non-administrators get neither menu nor run.**
#[tokio::test]
async fn test_admins_only() {
    let store = seeded_store(&[group_message(1, "Team", "hi", 0)]).await;
    let f = fixture(store, KeyedLlm::ok(), MockBot::new()).await;
    let surface = Arc::new(TriggerSurface::new(
        f.pipeline.clone(),
        f.bot.clone(),
        vec![1],
        true,
    ));

    let menu = surface.present_menu(&Chat::private(2), &user(2)).await;
    assert!(matches!(
        menu,
        Err(DigestError::Handler(HandlerError::Unauthorized))
    ));
    let selection = surface
        .on_selection(&Chat::private(2), &user(2), "start_analysis_1_day")
        .await;
    assert!(selection.is_err());
    assert!(f.bot.sent().is_empty());

    surface.present_menu(&Chat::private(1), &user(1)).await.unwrap();
    assert_eq!(f.bot.sent().len(), 1);
}
