use test_utils::staged_log_json;

use super::SessionController;
use super::Submission;
use crate::domain::models::AgentReply;
use crate::domain::models::Author;
use crate::domain::models::HistoryEntry;
use crate::domain::models::MessageType;
use crate::domain::models::ReplyLog;

fn reply(response: Option<&str>, log: Option<&str>) -> AgentReply {
    return AgentReply {
        response: response.map(|text| return text.to_string()),
        response_log: log.map(|text| return ReplyLog::Text(text.to_string())),
    };
}

#[test]
fn it_opens_a_turn_with_exactly_one_user_message() {
    let mut controller = SessionController::default();
    let res = controller.submit("  what is a gene?  ");

    assert_eq!(res, Submission::Accepted("what is a gene?".to_string()));
    assert!(controller.is_pending());

    let log = controller.conversation.snapshot();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].author, Author::User);
    assert_eq!(log[0].text, "what is a gene?".to_string());
}

#[test]
fn it_rejects_empty_input_without_a_turn() {
    let mut controller = SessionController::default();

    assert_eq!(controller.submit(""), Submission::Rejected);
    assert_eq!(controller.submit("   \n\t  "), Submission::Rejected);
    assert!(!controller.is_pending());
    assert!(controller.conversation.is_empty());
}

#[test]
fn it_refuses_a_second_turn_while_pending() {
    let mut controller = SessionController::default();
    controller.submit("first");

    assert_eq!(controller.submit("second"), Submission::Busy);
    assert_eq!(controller.conversation.len(), 1);
}

#[test]
fn it_resolves_a_turn_with_text_and_trace() {
    let mut controller = SessionController::default();
    controller.submit("question");
    controller.resolve(reply(Some("hi"), Some("trace1")));

    assert!(!controller.is_pending());

    let log = controller.conversation.snapshot();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].author, Author::User);
    assert_eq!(log[1].author, Author::Agent);
    assert_eq!(log[1].text, "hi".to_string());
    assert_eq!(log[1].trace(), Some("trace1"));
}

#[test]
fn it_substitutes_a_placeholder_for_a_missing_response() {
    let mut controller = SessionController::default();
    controller.submit("question");
    controller.resolve(reply(None, Some("trace1")));

    let log = controller.conversation.snapshot();
    assert_eq!(log[1].text, "[No response]".to_string());
    assert_eq!(log[1].trace(), Some("trace1"));
}

#[test]
fn it_substitutes_a_placeholder_for_a_missing_log() {
    let mut controller = SessionController::default();
    controller.submit("question");
    controller.resolve(reply(Some("hi"), None));

    let log = controller.conversation.snapshot();
    assert_eq!(log[1].text, "hi".to_string());
    assert_eq!(log[1].trace(), Some("[No log]"));
}

#[test]
fn it_renders_a_staged_log_into_the_trace() {
    let mut controller = SessionController::default();
    controller.submit("question");

    let staged: ReplyLog = serde_json::from_str(staged_log_json()).unwrap();
    controller.resolve(AgentReply {
        response: Some("hi".to_string()),
        response_log: Some(staged),
    });

    let log = controller.conversation.snapshot();
    assert!(log[1].trace().unwrap().contains("RAG-R:"));
    assert!(log[1].trace().unwrap().contains("  - source 1"));
}

#[test]
fn it_fails_a_turn_without_an_agent_message() {
    let mut controller = SessionController::default();
    controller.submit("question");

    let body = serde_json::from_str::<AgentReply>("not json").unwrap_err();
    controller.fail(&crate::domain::models::TransportError::MalformedReply(body));

    assert!(!controller.is_pending());

    let log = controller.conversation.snapshot();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].author, Author::User);
    assert_eq!(log[1].author, Author::Confab);
    assert_eq!(log[1].message_type(), MessageType::Error);
    assert!(log[1].text.contains("could not be parsed"));
    assert!(log[1].trace().is_none());
}

#[test]
fn it_accepts_a_new_turn_after_resolution() {
    let mut controller = SessionController::default();
    controller.submit("first");
    controller.resolve(reply(Some("hi"), None));

    let res = controller.submit("second");
    assert_eq!(res, Submission::Accepted("second".to_string()));
    assert_eq!(controller.conversation.len(), 3);
}

#[test]
fn it_refuses_restore_while_pending() {
    let mut controller = SessionController::default();
    controller.submit("first");

    let entries = vec![HistoryEntry("restored".to_string(), None)];
    assert!(!controller.restore(&entries));
    assert_eq!(controller.conversation.len(), 1);
    assert_eq!(controller.conversation.snapshot()[0].text, "first".to_string());
}

#[test]
fn it_restores_a_server_session_when_idle() {
    let mut controller = SessionController::default();
    controller.submit("first");
    controller.resolve(reply(Some("hi"), None));

    let entries = vec![HistoryEntry(
        "restored question".to_string(),
        Some("restored answer".to_string()),
    )];
    assert!(controller.restore(&entries));

    let log = controller.conversation.snapshot();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].text, "restored question".to_string());
    assert_eq!(log[1].author, Author::Agent);
}
