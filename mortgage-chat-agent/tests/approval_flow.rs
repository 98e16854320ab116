use mockito::Matcher;
use mortgage_chat_agent::{ConversationController, ConversationState, FailureKind, TurnOutcome};
use mortgage_chat_client::HttpAssistantClient;
use mortgage_chat_core::config::DEFAULT_FALLBACK_MESSAGE;
use mortgage_chat_core::protocol::PendingCalculation;
use mortgage_chat_core::session::{Role, SessionStore};
use serde_json::json;
use std::sync::Arc;

const APPROVAL_BODY: &str = r#"{
    "response": "",
    "sessionId": "s1",
    "requiresApproval": true,
    "pendingCalculation": {
        "homePrice": 500000,
        "downPayment": 100000,
        "interestRate": 6.5,
        "loanTerm": 30,
        "zipCode": "90210"
    }
}"#;

fn expected_calculation() -> PendingCalculation {
    PendingCalculation {
        interest_rate: 6.5,
        down_payment: 100000.0,
        zip_code: "90210".to_string(),
        home_price: 500000.0,
        loan_term: 30,
    }
}

fn controller_for(server: &mockito::ServerGuard) -> ConversationController {
    let client = HttpAssistantClient::new(format!("{}/chat", server.url()));
    ConversationController::new(Arc::new(client), SessionStore::new())
}

#[tokio::test]
async fn test_full_approval_flow_over_http() {
    let mut server = mockito::Server::new_async().await;

    let greet = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({ "message": "Hi" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response":"Hello","sessionId":"s1","requiresApproval":false}"#)
        .expect(1)
        .create_async()
        .await;
    let simulate = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({
            "message": "Simulate a $500000 loan",
            "sessionId": "s1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(APPROVAL_BODY)
        .expect(1)
        .create_async()
        .await;
    let approve = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({
            "sessionId": "s1",
            "approval": { "approved": true }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"response":"Approved, result: $2,528/month","sessionId":"s1","requiresApproval":false}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let controller = controller_for(&server);

    assert_eq!(controller.send_message("Hi").await, TurnOutcome::Replied);
    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!((transcript[0].role, transcript[0].content.as_str()), (Role::User, "Hi"));
    assert_eq!(
        (transcript[1].role, transcript[1].content.as_str()),
        (Role::Assistant, "Hello")
    );
    assert_eq!(controller.session().get().as_deref(), Some("s1"));

    let outcome = controller.send_message("Simulate a $500000 loan").await;
    assert_eq!(outcome, TurnOutcome::ApprovalRequired(expected_calculation()));
    assert_eq!(controller.transcript_len(), 3);
    assert_eq!(
        controller.state(),
        ConversationState::AwaitingApprovalDecision(expected_calculation())
    );

    assert_eq!(controller.decide(true).await, TurnOutcome::Replied);
    assert_eq!(controller.transcript_len(), 4);
    assert_eq!(
        controller.transcript().last().map(|m| m.content.clone()),
        Some("Approved, result: $2,528/month".to_string())
    );
    assert_eq!(controller.pending_action(), None);
    assert!(controller.state().is_idle());

    greet.assert_async().await;
    simulate.assert_async().await;
    approve.assert_async().await;
}

#[tokio::test]
async fn test_approval_turn_server_error_clears_pending() {
    let mut server = mockito::Server::new_async().await;
    let _simulate = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({ "message": "Simulate" })))
        .with_status(200)
        .with_body(APPROVAL_BODY)
        .create_async()
        .await;
    let deny = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({
            "sessionId": "s1",
            "approval": { "approved": false }
        })))
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;

    let controller = controller_for(&server);
    controller.send_message("Simulate").await;
    let before = controller.transcript_len();

    assert_eq!(
        controller.decide(false).await,
        TurnOutcome::Failed(FailureKind::Server)
    );
    assert_eq!(controller.transcript_len(), before + 1);
    assert_eq!(
        controller.transcript().last().map(|m| (m.role, m.content.clone())),
        Some((Role::Assistant, DEFAULT_FALLBACK_MESSAGE.to_string()))
    );
    assert_eq!(controller.pending_action(), None);
    assert!(controller.state().is_idle());
    assert!(controller.is_input_enabled());

    deny.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    let client = HttpAssistantClient::new("http://127.0.0.1:1/chat");
    let controller = ConversationController::new(Arc::new(client), SessionStore::new());

    assert_eq!(
        controller.send_message("Hi").await,
        TurnOutcome::Failed(FailureKind::Transport)
    );
    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].content, DEFAULT_FALLBACK_MESSAGE);
    assert!(controller.state().is_idle());
    assert!(controller.session().is_empty());
}
