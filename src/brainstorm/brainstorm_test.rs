// ABOUTME: Tests for the brainstorm orchestrator.
// ABOUTME: Covers turn order, transcript flattening, persona reset and failures.

use futures::{StreamExt, TryStreamExt};

use super::*;
use crate::error::LlmError;
use crate::llm::test_support::{ScriptedTransport, openai_reply, provider};
use crate::llm::{Message, Provider, ProviderKind};

fn named(name: &str) -> Provider {
    let mut config = provider(ProviderKind::OpenAI).config().clone();
    config.name = name.to_string();
    Provider::new(ProviderKind::OpenAI, config)
}

fn last_user_message(body: &serde_json::Value) -> String {
    let messages = body["messages"].as_array().unwrap();
    messages.last().unwrap()["content"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_two_rounds_two_participants() {
    let transport = ScriptedTransport::new()
        .respond(openai_reply("a1"))
        .respond(openai_reply("b1"))
        .respond(openai_reply("a2"))
        .respond(openai_reply("b2"));
    let mut p1 = named("P1");
    let mut p2 = named("P2");
    let brainstorm = Brainstorm::new("brainstorm persona");

    let turns: Vec<Turn> = brainstorm
        .run(&transport, "topic".to_string(), 2, vec![&mut p1, &mut p2])
        .try_collect()
        .await
        .unwrap();

    let order: Vec<_> = turns.iter().map(|t| t.speaker.as_str()).collect();
    assert_eq!(order, ["P1", "P2", "P1", "P2"]);
    let contents: Vec<_> = turns.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, ["a1", "b1", "a2", "b2"]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(last_user_message(&requests[0].body), "user: topic\n\n");
    assert_eq!(
        last_user_message(&requests[1].body),
        "user: topic\n\nP1: a1\n\n"
    );
    assert_eq!(
        last_user_message(&requests[2].body),
        "user: topic\n\nP1: a1\n\nP2: b1\n\n"
    );
    assert_eq!(
        last_user_message(&requests[3].body),
        "user: topic\n\nP1: a1\n\nP2: b1\n\nP1: a2\n\n"
    );
}

#[tokio::test]
async fn test_participant_history_grows_per_turn() {
    let transport = ScriptedTransport::new()
        .respond(openai_reply("a1"))
        .respond(openai_reply("a2"));
    let mut p1 = named("P1");
    let brainstorm = Brainstorm::new("persona");

    let turns: Vec<Turn> = brainstorm
        .run(&transport, "topic".to_string(), 2, vec![&mut p1])
        .try_collect()
        .await
        .unwrap();
    assert_eq!(turns.len(), 2);

    // system + (user, assistant) * 2
    assert_eq!(p1.history().len(), 5);
    assert_eq!(p1.history()[4], Message::assistant("a2"));
}

#[tokio::test]
async fn test_start_applies_persona() {
    let mut p1 = named("P1");
    let mut p2 = named("P2");
    p1.append_user_turn("old");
    let brainstorm = Brainstorm::new("persona");

    brainstorm.start(&mut [&mut p1, &mut p2]);

    assert_eq!(p1.system_role(), "persona");
    assert_eq!(p1.history(), &[Message::system("persona")]);
    assert_eq!(p2.system_role(), "persona");
}

#[tokio::test]
async fn test_start_twice_keeps_history() {
    let mut p1 = named("P1");
    let brainstorm = Brainstorm::new("persona");
    brainstorm.start(&mut [&mut p1]);
    p1.append_user_turn("kept");

    brainstorm.start(&mut [&mut p1]);

    assert_eq!(p1.history().len(), 2);
}

#[tokio::test]
async fn test_failure_ends_stream_after_partial_progress() {
    let transport = ScriptedTransport::new()
        .respond(openai_reply("a1"))
        .fail("timeout");
    let mut p1 = named("P1");
    let mut p2 = named("P2");
    let brainstorm = Brainstorm::new("persona");

    let results: Vec<Result<Turn, LlmError>> = brainstorm
        .run(&transport, "topic".to_string(), 3, vec![&mut p1, &mut p2])
        .collect()
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().content, "a1");
    assert!(matches!(results[1], Err(LlmError::Transport(_))));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_zero_rounds_yields_nothing() {
    let transport = ScriptedTransport::new();
    let mut p1 = named("P1");
    let brainstorm = Brainstorm::new("persona");

    let turns: Vec<_> = brainstorm
        .run(&transport, "topic".to_string(), 0, vec![&mut p1])
        .collect()
        .await;

    assert!(turns.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_each_run_starts_fresh_transcript() {
    let transport = ScriptedTransport::new()
        .respond(openai_reply("first"))
        .respond(openai_reply("second"));
    let mut p1 = named("P1");
    let brainstorm = Brainstorm::new("persona");

    let _: Vec<_> = brainstorm
        .run(&transport, "one".to_string(), 1, vec![&mut p1])
        .collect()
        .await;
    let _: Vec<_> = brainstorm
        .run(&transport, "two".to_string(), 1, vec![&mut p1])
        .collect()
        .await;

    assert_eq!(last_user_message(&transport.requests()[1].body), "user: two\n\n");
}
