use super::*;
use crate::api::ChatResponse;
use crate::test_support::FakeBackend;

fn answering(answer: &str) -> FakeBackend {
    FakeBackend::chatting(Ok(ChatResponse {
        answer: answer.to_string(),
    }))
}

#[test]
fn new_panel_is_empty() {
    let panel = ChatPanel::new("summary");
    assert_eq!(panel.context(), "summary");
    assert!(panel.messages().is_empty());
    assert!(!panel.loading());
    assert_eq!(panel.error(), None);
}

#[tokio::test]
async fn question_is_sent_with_context() {
    let backend = answering("Yes, it renews yearly.");
    let mut panel = ChatPanel::new("The plan auto-renews.");

    let answer = panel.ask(&backend, "  Does it renew?  ").await;
    assert_eq!(answer, Some("Yes, it renews yearly."));

    let calls = backend.chat_calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![ChatRequest {
            question: "Does it renew?".into(),
            context: "The plan auto-renews.".into(),
        }]
    );

    let roles: Vec<Role> = panel.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert!(!panel.loading());
}

#[tokio::test]
async fn blank_question_is_rejected_locally() {
    let backend = answering("unused");
    let mut panel = ChatPanel::new("ctx");
    assert_eq!(panel.ask(&backend, "   ").await, None);
    assert_eq!(panel.error(), Some(EMPTY_QUESTION_MESSAGE));
    assert_eq!(backend.chat_count(), 0);
    assert!(panel.messages().is_empty());
}

#[tokio::test]
async fn failure_keeps_question_and_sets_error() {
    let backend = FakeBackend::chatting(Err(ApiFailure::status(400, Some("Context is required".into()))));
    let mut panel = ChatPanel::new("ctx");
    assert_eq!(panel.ask(&backend, "Why?").await, None);
    assert_eq!(panel.error(), Some("Context is required"));
    assert_eq!(panel.messages().len(), 1);
    assert!(!panel.loading());
}

#[tokio::test]
async fn failure_without_message_uses_fallback() {
    let backend = FakeBackend::chatting(Err(ApiFailure { response: None, message: None }));
    let mut panel = ChatPanel::new("ctx");
    panel.ask(&backend, "Why?").await;
    assert_eq!(panel.error(), Some(CHAT_FAILURE_MESSAGE));
}

#[tokio::test]
async fn next_question_clears_previous_error() {
    let backend = answering("fine");
    let mut panel = ChatPanel::new("ctx");
    panel.ask(&backend, "").await;
    assert!(panel.error().is_some());
    panel.ask(&backend, "ok?").await;
    assert_eq!(panel.error(), None);

    panel.clear_history();
    assert!(panel.messages().is_empty());
}
