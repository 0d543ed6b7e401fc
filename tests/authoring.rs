//! Authoring engine tests
//!
//! Drive the keystroke interpreter and block renderer through the public API
//! the way a host would, and check the structural guarantees of the output.

use pretty_assertions::assert_eq;
use quillpad::core::input::{InputEvent, Key};
use quillpad::core::keystroke::{KeyOutcome, interpret};
use quillpad::core::markdown::{BlockNode, ListKind, render};
use quillpad::core::session::{EditingSession, SessionEvent};

fn enter() -> InputEvent {
    InputEvent::plain(Key::Enter)
}

/// Count-based nesting check over a node sequence
fn assert_balanced(nodes: &[BlockNode]) {
    let mut stack: Vec<ListKind> = Vec::new();
    for node in nodes {
        match node {
            BlockNode::ListOpen(kind) => stack.push(*kind),
            BlockNode::ListClose(kind) => {
                assert_eq!(stack.pop(), Some(*kind), "close without matching open in {:?}", nodes)
            }
            BlockNode::ListItem(_) => assert!(!stack.is_empty(), "item outside a list"),
            _ => assert!(stack.is_empty(), "block inside an open list"),
        }
    }
    assert!(stack.is_empty(), "unclosed list in {:?}", nodes);
}

// =============================================================================
// KEYSTROKE INTERPRETER
// =============================================================================

#[test]
fn tab_inserts_two_spaces() {
    assert_eq!(
        interpret("ab", 1, 1, &InputEvent::plain(Key::Tab)),
        KeyOutcome::Transform {
            text: "a  b".to_string(),
            cursor: 3
        }
    );
}

#[test]
fn enter_continues_unordered_list() {
    assert_eq!(
        interpret("- item", 6, 6, &enter()),
        KeyOutcome::Transform {
            text: "- item\n- ".to_string(),
            cursor: 9
        }
    );
}

#[test]
fn enter_continues_ordered_list() {
    let KeyOutcome::Transform { text, cursor } = interpret("3. item", 7, 7, &enter()) else {
        panic!("expected a transform");
    };
    assert_eq!(text, "3. item\n4. ");
    assert_eq!(cursor, text.chars().count());
}

#[test]
fn save_accelerator_wins_over_everything() {
    assert_eq!(interpret("- a", 3, 3, &InputEvent::ctrl('s')), KeyOutcome::RequestSave);

    let mut command_s = InputEvent::plain(Key::Char('s'));
    command_s.meta = true;
    assert_eq!(interpret("", 0, 0, &command_s), KeyOutcome::RequestSave);
}

#[test]
fn ordinary_keys_pass_through() {
    assert_eq!(
        interpret("plain", 5, 5, &enter()),
        KeyOutcome::PassThrough
    );
    assert_eq!(
        interpret("- a", 3, 3, &InputEvent::plain(Key::Char('x'))),
        KeyOutcome::PassThrough
    );
}

// =============================================================================
// BLOCK RENDERER
// =============================================================================

#[test]
fn heading_closes_open_list() {
    assert_eq!(
        render("- a\n# Title"),
        vec![
            BlockNode::ListOpen(ListKind::Unordered),
            BlockNode::ListItem("a".to_string()),
            BlockNode::ListClose(ListKind::Unordered),
            BlockNode::Heading {
                level: 1,
                text: "Title".to_string()
            },
        ]
    );
}

#[test]
fn same_depth_kind_switch() {
    assert_eq!(
        render("- a\n1. b"),
        vec![
            BlockNode::ListOpen(ListKind::Unordered),
            BlockNode::ListItem("a".to_string()),
            BlockNode::ListClose(ListKind::Unordered),
            BlockNode::ListOpen(ListKind::Ordered),
            BlockNode::ListItem("b".to_string()),
            BlockNode::ListClose(ListKind::Ordered),
        ]
    );
}

#[test]
fn blank_line_resets_lists() {
    let nodes = render("- a\n\n- b");
    assert_eq!(
        nodes,
        vec![
            BlockNode::ListOpen(ListKind::Unordered),
            BlockNode::ListItem("a".to_string()),
            BlockNode::ListClose(ListKind::Unordered),
            BlockNode::Break,
            BlockNode::ListOpen(ListKind::Unordered),
            BlockNode::ListItem("b".to_string()),
            BlockNode::ListClose(ListKind::Unordered),
        ]
    );
}

#[test]
fn rendering_is_idempotent_and_balanced() {
    let samples = [
        "",
        "# One\n## Two\n### Three\n#### Four",
        "- a\n  - b\n    - c\nback to text",
        "1. a\n   * odd\n  2. b\n- c\n\n\n  * d",
        "    - deep first\n- shallow\n        1. deeper",
        "*not a list\n-also not\n1.nope",
        "\t- tabbed\n  \n- after whitespace-only line",
        "日本語\n- 項目\n  1. 二",
    ];
    for sample in samples {
        let first = render(sample);
        assert_eq!(first, render(sample), "render differs for {:?}", sample);
        assert_balanced(&first);
    }
}

#[test]
fn deep_nesting_closes_innermost_first() {
    let text: String = (0..50)
        .map(|depth| format!("{}- level {}\n", "  ".repeat(depth), depth))
        .collect();
    let nodes = render(&text);
    assert_balanced(&nodes);
    let opens = nodes
        .iter()
        .filter(|n| matches!(n, BlockNode::ListOpen(_)))
        .count();
    assert_eq!(opens, 50);
}

// =============================================================================
// SESSION: KEYS IN, BLOCKS OUT
// =============================================================================

#[test]
fn typing_a_nested_outline() {
    let mut session = EditingSession::default();
    let keys = "- groceries\n\tmilk\n";
    for c in keys.chars() {
        let event = match c {
            '\n' => enter(),
            '\t' => InputEvent::plain(Key::Tab),
            c => InputEvent::plain(Key::Char(c)),
        };
        assert_ne!(session.handle_key(&event), SessionEvent::SaveRequested);
    }

    // Tab after the continued marker indents the rest of the line
    assert_eq!(session.buffer().text(), "- groceries\n-   milk\n- ");
    assert_balanced(&session.render());
}

#[test]
fn long_document_stays_consistent() {
    let mut session = EditingSession::default();
    for i in 0..200 {
        for c in format!("{}. entry", i + 1).chars() {
            session.handle_key(&InputEvent::plain(Key::Char(c)));
        }
        session.handle_key(&enter());
        // Drop the auto-inserted marker so the next line is typed by hand
        let marker_len = format!("{}. ", i + 2).chars().count();
        for _ in 0..marker_len {
            session.handle_key(&InputEvent::plain(Key::Backspace));
        }
    }

    let nodes = session.render();
    assert_balanced(&nodes);
    let items = nodes
        .iter()
        .filter(|n| matches!(n, BlockNode::ListItem(_)))
        .count();
    assert_eq!(items, 200);
}
