use std::time::Duration;

use deliberate_agent::agent::{AgentError, ChatCompletionClient, ChatModel};
use deliberate_agent::domain::chat::ChatMessage;
use deliberate_agent::domain::model::Provider;
use deliberate_agent::domain::tool::ToolDescriptor;
use deliberate_agent::session::ModelAdapterConfig;
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::Server) -> ChatCompletionClient {
    let config = ModelAdapterConfig {
        provider: Provider::Groq,
        model_id: "groq/llama-3.3-70b-versatile".to_string(),
        api_key: "k".to_string(),
        api_base: Some(format!("{}/v1", server.url())),
    };
    ChatCompletionClient::new(config, Duration::from_secs(10)).unwrap()
}

fn transcript() -> Vec<ChatMessage> {
    vec![ChatMessage::system("be brief"), ChatMessage::user("hi")]
}

#[tokio::test]
async fn test_text_completion() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer k")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "hello"}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let turn = client_for(&server).complete(&transcript(), &[]).await.unwrap();
    assert_eq!(turn.content.as_deref(), Some("hello"));
    assert!(turn.tool_calls.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_tool_calls_are_decoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({"tool_choice": "auto"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_9",
                            "type": "function",
                            "function": {"name": "deliberate", "arguments": "{\"input\":\"x\"}"}
                        }]
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tools = vec![ToolDescriptor::new("deliberate", Some("reasoning".to_string()))];
    let turn = client_for(&server)
        .complete(&transcript(), &tools)
        .await
        .unwrap();

    assert_eq!(turn.content, None);
    assert_eq!(turn.tool_calls.len(), 1);
    let call = &turn.tool_calls[0];
    assert_eq!(call.id, "call_9");
    assert_eq!(call.function.name, "deliberate");
    assert_eq!(call.parsed_arguments().unwrap(), json!({"input": "x"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(&transcript(), &[])
        .await
        .unwrap_err();

    match err {
        AgentError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(&transcript(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Decode(_)));
}

#[tokio::test]
async fn test_garbage_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(&transcript(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Decode(_)));
}
