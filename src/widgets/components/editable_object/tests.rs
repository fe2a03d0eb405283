use indexmap::IndexMap;

use super::*;
use crate::core::value::{BigInt, OpaqueKind};
use crate::dom::event::UiEvent;
use crate::dom::listeners::{Handler, ListenerCategory};
use crate::runtime::event::ChangeAction;
use crate::terminal::KeyCode;
use crate::ui::span::line_text;
use crate::widgets::traits::{CustomElement, Drawable, MountContext};

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";

fn mounted(object: &str) -> EditableObject {
    mounted_with(object, MountContext::default())
}

fn mounted_with(object: &str, ctx: MountContext) -> EditableObject {
    let mut element = EditableObject::new("eo");
    element
        .set_attribute(ATTR_OBJECT, object)
        .expect("object attribute");
    element.connected(&ctx).expect("mount");
    element
}

fn keys(element: &EditableObject) -> Vec<&str> {
    element.rows().iter().map(PropertyRow::key).collect()
}

fn object_keys(element: &EditableObject) -> Vec<&str> {
    element.object().keys().map(String::as_str).collect()
}

fn item_handlers(element: &EditableObject, key: &str) -> Vec<Handler> {
    element
        .listeners()
        .iter()
        .filter(|l| l.category == ListenerCategory::Item && l.target.row_key() == Some(key))
        .map(|l| l.handler)
        .collect()
}

fn enter() -> UiEvent {
    UiEvent::key_press(KeyCode::Enter)
}

#[test]
fn mount_renders_rows_in_object_order_and_selects_first() {
    let element = mounted("{'b': 1, 'a': 'x', 'c': true}");

    assert_eq!(keys(&element), vec!["b", "a", "c"]);
    assert_eq!(element.row("a").map(PropertyRow::display), Some("x"));
    assert_eq!(element.row("c").map(PropertyRow::display), Some("true"));
    assert_eq!(element.selected_key(), Some("b"));
    assert_eq!(element.focused(), Some(&EventTarget::row_input("b")));
    assert!(element.row("b").is_some_and(PropertyRow::is_tabbable));
    assert!(!element.row("a").is_some_and(PropertyRow::is_tabbable));
}

#[test]
fn toolbar_hides_moves_past_the_edges() {
    let element = mounted("{'a': 1, 'b': 2, 'c': 3}");
    let toolbars: Vec<Toolbar> = element.rows().iter().map(PropertyRow::toolbar).collect();

    assert_eq!(toolbars[0].move_up, Control::Hidden);
    assert_eq!(toolbars[0].move_down, Control::Enabled);
    assert_eq!(toolbars[1].move_up, Control::Enabled);
    assert_eq!(toolbars[1].move_down, Control::Enabled);
    assert_eq!(toolbars[2].move_down, Control::Hidden);
    assert!(toolbars.iter().all(|t| t.remove.is_enabled()));

    let single = mounted("{'only': 1}");
    let toolbar = single.rows()[0].toolbar();
    assert_eq!(toolbar.move_up, Control::Hidden);
    assert_eq!(toolbar.move_down, Control::Hidden);
}

#[test]
fn missing_object_attribute_mounts_empty() {
    let mut element = EditableObject::new("eo");
    element.connected(&MountContext::default()).expect("mount");

    assert!(element.object().is_empty());
    assert!(element.rows().is_empty());
    assert_eq!(element.selected_key(), None);
    assert_eq!(element.listeners().count(ListenerCategory::Component), 5);
    assert_eq!(element.add_property_placeholder(), DEFAULT_ADD_PROPERTY_PLACEHOLDER);
}

#[test]
fn malformed_object_attribute_fails_mount() {
    let mut element = EditableObject::new("eo");
    element
        .set_attribute(ATTR_OBJECT, "{'a': }")
        .expect_err("rejected on set");

    let err = element
        .connected(&MountContext::default())
        .expect_err("rejected on mount");
    assert!(matches!(err, InitError::MalformedObject(_)));
    assert!(!element.is_mounted());
    assert!(element.listeners().is_empty());

    assert_eq!(
        parse_object_attribute("[1, 2]"),
        Err(InitError::NotAnObject("array"))
    );
}

#[test]
fn double_click_opens_edit_session() {
    let mut element = mounted("{'a': 1, 'b': 2}");

    let result = element.dispatch(EventTarget::row_item("b"), UiEvent::double_click());

    assert!(result.handled);
    assert_eq!(element.editing_key(), Some("b"));
    assert!(element.row("b").is_some_and(PropertyRow::is_editing));
    assert_eq!(element.listeners().count(ListenerCategory::EditSession), 2);
    assert_eq!(element.focused(), Some(&EventTarget::row_input("b")));
}

#[test]
fn second_edit_is_refused_while_one_is_open() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    assert!(element.start_edit("a"));
    assert!(!element.start_edit("b"));

    assert_eq!(element.editing_key(), Some("a"));
    assert_eq!(element.listeners().count(ListenerCategory::EditSession), 2);
}

#[test]
fn enter_commits_decoded_value_and_emits_edit() {
    let mut element = mounted("{'a': 1, 'b': true}");
    element.start_edit("b");
    element.set_row_input("b", "false");

    let result = element.dispatch(EventTarget::row_input("b"), enter());

    assert_eq!(element.object().get("b"), Some(&Value::Bool(false)));
    assert_eq!(element.state(), &EditState::Selected { key: "b".into() });
    assert_eq!(element.listeners().count(ListenerCategory::EditSession), 0);
    assert_eq!(result.events.len(), 1);
    let event = &result.events[0];
    assert_eq!(event.action, ChangeAction::Edit);
    assert_eq!(event.key, "b");
    assert_eq!(event.previous, Value::Bool(true));
    assert_eq!(event.new, Value::Bool(false));
}

#[test]
fn blur_commits_and_normalizes_display() {
    let mut element = mounted("{'n': 1}");
    element.start_edit("n");
    element.set_row_input("n", "  42 ");

    let result = element.dispatch(EventTarget::row_input("n"), UiEvent::blur());

    assert_eq!(result.events.len(), 1);
    assert_eq!(element.object().get("n"), Some(&Value::Number(42.0)));
    assert_eq!(element.row("n").map(PropertyRow::display), Some("42"));
}

#[test]
fn other_keys_do_not_commit() {
    let mut element = mounted("{'a': 1}");
    element.start_edit("a");

    let result = element.dispatch(EventTarget::row_input("a"), UiEvent::key_press(KeyCode::Char('x')));

    assert!(result.events.is_empty());
    assert_eq!(element.editing_key(), Some("a"));
}

#[test]
fn invalid_edit_reverts_and_flags_row() {
    let mut element = mounted("{'a': 1}");
    element.start_edit("a");
    element.set_row_input("a", "{bad");

    let err = element.commit_edit().expect_err("malformed literal");

    assert_eq!(err.input(), "{bad");
    assert_eq!(element.object().get("a"), Some(&Value::Number(1.0)));
    let row = element.row("a").expect("row");
    assert_eq!(row.display(), "1");
    assert!(row.is_invalid());
    assert!(!row.is_editing());
    assert!(element.take_events().is_empty());
    assert_eq!(element.listeners().count(ListenerCategory::EditSession), 0);
}

#[test]
fn selecting_another_row_commits_pending_edit() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    element.start_edit("a");
    element.set_row_input("a", "10n");

    let result = element.dispatch(EventTarget::row("b"), UiEvent::click());

    assert_eq!(
        element.object().get("a"),
        Some(&Value::BigInt(BigInt::from(10)))
    );
    assert_eq!(element.selected_key(), Some("b"));
    assert_eq!(result.events.len(), 1);
}

#[test]
fn enter_on_row_selects_it() {
    let mut element = mounted("{'a': 1, 'b': 2}");

    element.dispatch(EventTarget::row_input("b"), enter());

    assert_eq!(element.selected_key(), Some("b"));
    assert!(!element.row("a").is_some_and(PropertyRow::is_selected));
}

#[test]
fn move_buttons_reorder_rows_but_not_object() {
    let mut element = mounted("{'a': 1, 'b': 2, 'c': 3}");

    assert!(!element.move_up("a"));
    assert!(!element.move_down("c"));

    let result = element.dispatch(EventTarget::MoveUp("b".into()), UiEvent::click());
    assert!(result.events.is_empty());
    assert_eq!(keys(&element), vec!["b", "a", "c"]);
    assert_eq!(object_keys(&element), vec!["a", "b", "c"]);
    assert_eq!(element.rows()[0].toolbar().move_up, Control::Hidden);
    assert_eq!(element.rows()[1].toolbar().move_up, Control::Enabled);
    assert_eq!(element.focused(), Some(&EventTarget::MoveUp("b".into())));
    // Propagation stopped before the row click handler.
    assert_eq!(element.selected_key(), Some("a"));

    assert!(element.move_down("b"));
    assert_eq!(keys(&element), vec!["a", "b", "c"]);
}

#[test]
fn remove_deletes_key_and_its_listeners() {
    let mut element = mounted("{'a': 1, 'b': 'two', 'c': 3}");
    assert_eq!(item_handlers(&element, "b").len(), 6);

    let result = element.dispatch(EventTarget::Remove("b".into()), UiEvent::click());

    assert_eq!(object_keys(&element), vec!["a", "c"]);
    assert_eq!(keys(&element), vec!["a", "c"]);
    assert!(item_handlers(&element, "b").is_empty());
    assert_eq!(element.listeners().count(ListenerCategory::Item), 12);
    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].action, ChangeAction::Remove);
    assert_eq!(result.events[0].previous, Value::Text("two".into()));
    assert_eq!(result.events[0].new, Value::Null);
    assert_eq!(element.rows()[1].toolbar().move_down, Control::Hidden);

    let stale = element.dispatch(EventTarget::Remove("b".into()), UiEvent::click());
    assert!(!stale.handled);
}

#[test]
fn removing_selected_row_clears_selection() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    assert!(element.remove("a"));
    assert_eq!(element.selected_key(), None);
    assert!(!element.remove("a"));
}

#[test]
fn add_property_merges_decoded_value() {
    let mut element = mounted("{}");
    element.set_add_input("count: 42");

    let result = element.dispatch(EventTarget::AddInput, enter());

    assert_eq!(element.object().get("count"), Some(&Value::Number(42.0)));
    assert_eq!(element.selected_key(), Some("count"));
    assert_eq!(element.add_input(), "");
    assert_eq!(result.events.len(), 1);
    let event = &result.events[0];
    assert_eq!(event.action, ChangeAction::Add);
    assert_eq!(event.previous, Value::Null);
    assert_eq!(event.new, Value::Number(42.0));
}

#[test]
fn add_button_appends_structural_value() {
    let mut element = mounted("{'a': 1}");
    element.set_add_input("tags: ['x', 'y']");

    element.dispatch(EventTarget::AddButton, UiEvent::click());

    assert_eq!(object_keys(&element), vec!["a", "tags"]);
    assert_eq!(
        element.object().get("tags"),
        Some(&Value::List(vec![Value::from("x"), Value::from("y")]))
    );
    assert_eq!(element.row("tags").map(PropertyRow::display), Some("['x','y']"));
}

#[test]
fn rejected_add_leaves_object_alone() {
    let mut element = mounted("{'a': 1}");

    for (input, expected) in [
        ("a: ", AddPropertyError::Literal(crate::core::literal::LiteralError::EmptyValue)),
        ("a: 2", AddPropertyError::DuplicateKey("a".into())),
        ("novalue", AddPropertyError::Literal(crate::core::literal::LiteralError::MissingSeparator)),
    ] {
        element.set_add_input(input);
        assert_eq!(element.add_property(), Err(expected));
        assert!(element.add_input_invalid());
    }

    element.set_add_input("color: {bad");
    assert!(matches!(element.add_property(), Err(AddPropertyError::Decode(_))));
    assert_eq!(element.add_input(), "color: {bad");

    element.set_add_input("   ");
    assert_eq!(element.add_property(), Ok(None));

    assert_eq!(object_keys(&element), vec!["a"]);
    assert!(element.take_events().is_empty());
}

#[test]
fn set_object_rebuilds_listeners_without_duplicates() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    element.start_edit("a");

    let mut next = IndexMap::new();
    next.insert("x".to_string(), Value::from(1.0));
    assert!(element.set_object(Value::Object(next)));

    assert_eq!(keys(&element), vec!["x"]);
    assert_eq!(element.editing_key(), None);
    assert_eq!(element.listeners().count(ListenerCategory::EditSession), 0);
    assert_eq!(element.listeners().count(ListenerCategory::Item), 6);
    assert!(item_handlers(&element, "a").is_empty());

    assert!(!element.set_object(Value::Null));
    assert!(!element.set_object(Value::Number(5.0)));
    assert_eq!(keys(&element), vec!["x"]);
}

#[test]
fn merge_object_keeps_existing_positions() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    let mut partial = IndexMap::new();
    partial.insert("c".to_string(), Value::from(3.0));
    partial.insert("a".to_string(), Value::from("one"));

    element.merge_object(partial);

    assert_eq!(object_keys(&element), vec!["a", "b", "c"]);
    assert_eq!(element.object().get("a"), Some(&Value::from("one")));
    assert!(element.take_events().is_empty());
}

#[test]
fn disable_edit_removes_editing_affordances() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    element.start_edit("a");
    element.set_row_input("a", "changed");

    element
        .set_attribute(ATTR_DISABLE_EDIT, "")
        .expect("attribute");

    assert!(element.disable_edit());
    assert_eq!(element.editing_key(), None);
    assert_eq!(element.row("a").map(PropertyRow::display), Some("1"));
    assert_eq!(element.listeners().count(ListenerCategory::Component), 2);
    assert_eq!(element.listeners().count(ListenerCategory::EditSession), 0);
    assert_eq!(
        item_handlers(&element, "a"),
        vec![Handler::SelectRow, Handler::KeySelect, Handler::MoveUp, Handler::MoveDown]
    );
    assert!(element.rows().iter().all(|row| row.toolbar().remove == Control::Removed));
    assert!(!element.start_edit("b"));
    assert!(!element.remove("b"));
    assert_eq!(element.add_property(), Err(AddPropertyError::EditDisabled));

    let markup = element.shadow_markup();
    assert!(!markup.contains(r#"class="add-new-object-property-input"#));
    assert!(!markup.contains(r#"class="editable-object-remove-property"#));
    assert!(markup.contains(r#"class="editable-object-down-property"#));

    element
        .set_attribute(ATTR_DISABLE_EDIT, "false")
        .expect("attribute");
    assert!(!element.disable_edit());
    assert_eq!(element.listeners().count(ListenerCategory::Component), 5);
    assert!(element.start_edit("b"));
}

#[test]
fn outside_click_defocuses_until_container_click() {
    let mut element = mounted("{'a': 1}");

    element.dispatch(EventTarget::Outside, UiEvent::click());
    assert!(element.is_defocused());
    assert!(element.shadow_markup().contains(r#"class="editable-object defocused""#));

    element.dispatch(EventTarget::row("a"), UiEvent::click());
    assert!(!element.is_defocused());
}

#[test]
fn new_property_click_clears_selection() {
    let mut element = mounted("{'a': 1}");

    element.dispatch(EventTarget::AddInput, UiEvent::click());

    assert_eq!(element.selected_key(), None);
    assert!(!element.row("a").is_some_and(PropertyRow::is_selected));
    assert_eq!(element.focused(), Some(&EventTarget::AddInput));
}

#[test]
fn touch_double_tap_starts_edit() {
    let mut element = mounted_with("{'a': 1}", MountContext::with_user_agent(IPHONE));
    assert!(element.is_touch());
    assert!(item_handlers(&element, "a").contains(&Handler::DoubleTapEdit));

    element.dispatch(EventTarget::row_input("a"), UiEvent::touch_end(1_000));
    assert_eq!(element.editing_key(), None);
    element.dispatch(EventTarget::row_input("a"), UiEvent::touch_end(1_200));
    assert_eq!(element.editing_key(), Some("a"));
    assert!(element.shadow_markup().contains(r#"class="editable-object touch""#));
}

#[test]
fn desktop_mount_has_no_touch_listeners() {
    let element = mounted("{'a': 1}");
    assert!(!item_handlers(&element, "a").contains(&Handler::DoubleTapEdit));
}

#[test]
fn unmount_releases_everything() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    element.start_edit("a");

    element.disconnected();

    assert!(element.listeners().is_empty());
    assert!(!element.is_mounted());
    let result = element.dispatch(EventTarget::row("b"), UiEvent::click());
    assert!(!result.handled);

    element.connected(&MountContext::default()).expect("remount");
    assert_eq!(element.listeners().count(ListenerCategory::Item), 12);
    assert_eq!(element.listeners().count(ListenerCategory::Component), 5);
}

#[test]
fn markup_escapes_and_hides_edge_controls() {
    let mut element = mounted(r#"{'a': 'say "hi"', 'b': '<b>'}"#);
    element.set_add_property_placeholder(Some("key:value please"));

    let markup = element.shadow_markup();

    assert!(!markup.contains("__"));
    assert!(markup.contains("value=\"say &quot;hi&quot;\""));
    assert!(markup.contains("value=\"&lt;b&gt;\""));
    assert!(markup.contains(r#"placeholder="key:value please""#));
    assert!(markup.contains(
        r#"class="editable-object-up-property icon" title="Move up" tabindex="0" style="visibility:hidden""#
    ));
    assert!(markup.contains(r#"<li class="selected" data-key="a">"#));
    assert!(markup.contains(r#"<li class="" data-key="b">"#));
}

#[test]
fn draw_lists_rows_and_add_line() {
    let mut element = mounted("{'name': 'x', 'n': 2}");
    element.set_add_input("k: v");

    let lines: Vec<String> = element.draw().lines.iter().map(line_text).collect();

    assert!(lines[0].starts_with("› name : x"));
    assert_eq!(lines[1], "  n    : 2");
    assert_eq!(lines.last().map(String::as_str), Some("+ k: v"));
}

#[test]
fn literal_looking_text_survives_an_untouched_commit() {
    let mut element = mounted("{'note': '{draft', 'zip': '02134'}");
    assert_eq!(element.row("note").map(PropertyRow::display), Some("'{draft'"));
    assert_eq!(element.row("zip").map(PropertyRow::display), Some("'02134'"));

    element.start_edit("note");
    assert_eq!(element.commit_edit(), Ok(true));

    assert!(!element.row("note").is_some_and(PropertyRow::is_invalid));
    assert_eq!(element.object().get("note"), Some(&Value::from("{draft")));
}

#[test]
fn edit_reports_decoded_previous_display() {
    let mut element = mounted("{'zip': '02134'}");
    element.start_edit("zip");
    element.set_row_input("zip", "x");

    let result = element.dispatch(EventTarget::row_input("zip"), UiEvent::blur());

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].previous, Value::from("02134"));
    assert_eq!(result.events[0].new, Value::from("x"));
}

#[test]
fn previous_values_are_decoded_from_the_row_text() {
    let mut object = IndexMap::new();
    object.insert(
        "ids".to_string(),
        Value::List(vec![Value::BigInt(BigInt::from(5))]),
    );
    object.insert("callback".to_string(), Value::Opaque(OpaqueKind::Function));
    let mut element = mounted("{}");
    element.set_object(Value::Object(object));

    element.start_edit("ids");
    element.set_row_input("ids", "[]");
    element.commit_edit().expect("commit");
    assert!(element.remove("callback"));

    let events = element.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].previous, Value::List(vec![Value::from("5n")]));
    assert_eq!(events[1].action, ChangeAction::Remove);
    assert_eq!(events[1].previous, Value::Null);
}

#[test]
fn moving_an_edited_row_commits_it() {
    let mut element = mounted("{'a': 1, 'b': 2}");
    element.start_edit("b");
    element.set_row_input("b", "7");

    let result = element.dispatch(EventTarget::MoveUp("b".into()), UiEvent::click());

    assert_eq!(element.editing_key(), None);
    assert_eq!(element.object().get("b"), Some(&Value::Number(7.0)));
    assert_eq!(keys(&element), vec!["b", "a"]);
    assert_eq!(element.listeners().count(ListenerCategory::EditSession), 0);
    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].action, ChangeAction::Edit);
}
