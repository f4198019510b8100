use deliberate_agent::cli::{ContinueChoice, InputHandler, InputHandlerResult};

#[test]
fn test_handle_regular_query() {
    let handler = InputHandler::default();
    let result = handler.handle("  What is the best sorting algorithm?  ");

    match result {
        InputHandlerResult::Query(q) => assert_eq!(q, "What is the best sorting algorithm?"),
        other => panic!("Expected Query result, got {other:?}"),
    }
}

#[test]
fn test_handle_exit_keywords_any_case() {
    let handler = InputHandler::default();
    for input in ["quit", "exit", "q", "QUIT", "Exit", " Q ", "qUiT\n"] {
        assert_eq!(handler.handle(input), InputHandlerResult::Exit, "input {input:?}");
    }
}

#[test]
fn test_exit_keyword_inside_sentence_is_a_query() {
    let handler = InputHandler::default();
    assert!(matches!(
        handler.handle("how do I quit vim"),
        InputHandlerResult::Query(_)
    ));
}

#[test]
fn test_handle_blank_input() {
    let handler = InputHandler::default();
    assert_eq!(handler.handle(""), InputHandlerResult::Empty);
    assert_eq!(handler.handle("   \t"), InputHandlerResult::Empty);
}

#[test]
fn test_skip_only_when_allowed() {
    let with_skip = InputHandler::new(true);
    let without_skip = InputHandler::new(false);

    assert_eq!(with_skip.continue_choice("skip"), ContinueChoice::Skip);
    assert_eq!(with_skip.continue_choice(" SKIP "), ContinueChoice::Skip);
    assert_eq!(with_skip.continue_choice(""), ContinueChoice::Continue);
    assert_eq!(without_skip.continue_choice("skip"), ContinueChoice::Continue);
}
