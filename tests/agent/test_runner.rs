use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use deliberate_agent::agent::{AgentError, ChatModel, DeliberationAgent, QueryRunner};
use deliberate_agent::domain::chat::{AssistantTurn, ChatMessage, FunctionCall, ToolCall};
use deliberate_agent::domain::tool::{ToolCallError, ToolDescriptor, ToolInvoker};
use serde_json::{Value, json};

/// Replays scripted turns and records every transcript it was sent
#[derive(Default)]
struct ScriptedModel {
    turns: Mutex<VecDeque<AssistantTurn>>,
    repeat_tool_calls: bool,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    fn new(turns: impl IntoIterator<Item = AssistantTurn>) -> Self {
        Self {
            turns: Mutex::new(turns.into_iter().collect()),
            ..Self::default()
        }
    }

    fn always_calling_tools() -> Self {
        Self {
            repeat_tool_calls: true,
            ..Self::default()
        }
    }

    fn transcripts(&self) -> Vec<Vec<ChatMessage>> {
        self.seen.lock().unwrap().clone()
    }
}

impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolDescriptor],
    ) -> Result<AssistantTurn, AgentError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        if self.repeat_tool_calls {
            return Ok(tool_turn(vec![call("", "deliberate", r#"{"input":"again"}"#)]));
        }
        self.turns.lock().unwrap().pop_front().ok_or(AgentError::Api {
            status: 503,
            body: "no more scripted turns".to_string(),
        })
    }
}

/// Tools with canned results, recording the arguments they receive
#[derive(Default)]
struct FakeTools {
    results: HashMap<String, Result<String, ToolCallError>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeTools {
    fn with(mut self, name: &str, result: Result<String, ToolCallError>) -> Self {
        self.results.insert(name.to_string(), result);
        self
    }
}

impl ToolInvoker for FakeTools {
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ToolCallError> {
        self.calls.lock().unwrap().push((name.to_string(), arguments));
        self.results
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ToolCallError::ToolNotFound(name.to_string())))
    }
}

fn call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        kind: "function".to_string(),
        function: FunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }
}

fn tool_turn(calls: Vec<ToolCall>) -> AssistantTurn {
    AssistantTurn {
        content: None,
        tool_calls: calls,
    }
}

fn deliberate_tool() -> Vec<ToolDescriptor> {
    vec![ToolDescriptor::new(
        "deliberate",
        Some("Multi-stage reasoning".to_string()),
    )]
}

fn tool_messages(transcript: &[ChatMessage]) -> Vec<(String, String)> {
    transcript
        .iter()
        .filter_map(|m| match m {
            ChatMessage::Tool {
                tool_call_id,
                content,
            } => Some((tool_call_id.clone(), content.clone())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_plain_answer_without_tools() {
    let model = ScriptedModel::new([AssistantTurn::text("42")]);
    let tools = FakeTools::default();
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 4);

    let answer = agent.run("What is six times seven?").await.unwrap();
    assert_eq!(answer, "42");

    let transcripts = model.transcripts();
    assert_eq!(transcripts.len(), 1);
    assert!(matches!(transcripts[0][0], ChatMessage::System { .. }));
    assert_eq!(
        transcripts[0][1],
        ChatMessage::user("What is six times seven?")
    );
}

#[tokio::test]
async fn test_tool_call_result_is_fed_back() {
    let model = ScriptedModel::new([
        tool_turn(vec![call("call_a", "deliberate", r#"{"input":"laptops"}"#)]),
        AssistantTurn::text("Buy the lighter one."),
    ]);
    let tools = FakeTools::default().with("deliberate", Ok("analysis: weight matters".to_string()));
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 4);

    let answer = agent.run("Which laptop?").await.unwrap();
    assert_eq!(answer, "Buy the lighter one.");

    let recorded = tools.calls.lock().unwrap().clone();
    assert_eq!(
        recorded,
        vec![("deliberate".to_string(), json!({"input": "laptops"}))]
    );

    let second = &model.transcripts()[1];
    assert!(matches!(second[2], ChatMessage::Assistant { .. }));
    assert_eq!(
        tool_messages(second),
        vec![("call_a".to_string(), "analysis: weight matters".to_string())]
    );
}

#[tokio::test]
async fn test_missing_call_ids_are_assigned() {
    let model = ScriptedModel::new([
        tool_turn(vec![
            call("", "deliberate", "{}"),
            call("", "deliberate", ""),
        ]),
        AssistantTurn::text("done"),
    ]);
    let tools = FakeTools::default().with("deliberate", Ok("ok".to_string()));
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 4);

    agent.run("q").await.unwrap();

    let ids: Vec<String> = tool_messages(&model.transcripts()[1])
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(ids, vec!["call_1_0".to_string(), "call_1_1".to_string()]);
}

#[tokio::test]
async fn test_tool_error_is_reported_to_model() {
    let model = ScriptedModel::new([
        tool_turn(vec![call("c1", "deliberate", r#"{"input":"x"}"#)]),
        AssistantTurn::text("Sorry, the tool failed."),
    ]);
    let tools = FakeTools::default().with(
        "deliberate",
        Err(ToolCallError::ToolError {
            name: "deliberate".to_string(),
            message: "boom".to_string(),
        }),
    );
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 4);

    let answer = agent.run("q").await.unwrap();
    assert_eq!(answer, "Sorry, the tool failed.");

    let (_, content) = &tool_messages(&model.transcripts()[1])[0];
    assert_eq!(content, "Error: Tool 'deliberate' reported an error: boom");
}

#[tokio::test]
async fn test_malformed_arguments_skip_the_tool() {
    let model = ScriptedModel::new([
        tool_turn(vec![call("c1", "deliberate", "{not json")]),
        AssistantTurn::text("retrying is pointless"),
    ]);
    let tools = FakeTools::default().with("deliberate", Ok("unused".to_string()));
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 4);

    agent.run("q").await.unwrap();

    assert!(tools.calls.lock().unwrap().is_empty());
    let (_, content) = &tool_messages(&model.transcripts()[1])[0];
    assert!(content.starts_with("Error: invalid JSON arguments"));
}

#[tokio::test]
async fn test_step_limit_ends_query() {
    let model = ScriptedModel::always_calling_tools();
    let tools = FakeTools::default().with("deliberate", Ok("more".to_string()));
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 2);

    let err = agent.run("loop forever").await.unwrap_err();
    assert!(matches!(err, AgentError::StepLimit(2)));
    assert_eq!(model.transcripts().len(), 2);
}

#[tokio::test]
async fn test_model_failure_propagates() {
    let model = ScriptedModel::new([]);
    let tools = FakeTools::default();
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 3);

    let err = agent.run("q").await.unwrap_err();
    assert!(matches!(err, AgentError::Api { status: 503, .. }));
}

#[tokio::test]
async fn test_each_query_starts_fresh() {
    let model = ScriptedModel::new([AssistantTurn::text("one"), AssistantTurn::text("two")]);
    let tools = FakeTools::default();
    let agent = DeliberationAgent::new(&model, &tools, deliberate_tool(), 3);

    assert_eq!(agent.run("first").await.unwrap(), "one");
    assert_eq!(agent.run("second").await.unwrap(), "two");

    let transcripts = model.transcripts();
    assert_eq!(transcripts[1].len(), 2);
    assert_eq!(transcripts[1][1], ChatMessage::user("second"));
}

#[test]
fn test_zero_step_limit_is_raised_to_one() {
    let agent = DeliberationAgent::new(
        ScriptedModel::default(),
        FakeTools::default(),
        Vec::new(),
        0,
    );
    assert_eq!(agent.max_steps(), 1);
}
