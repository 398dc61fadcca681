//! Integration tests for the render pipeline.
//!
//! These tests drive the engine through its public surface only and inspect
//! the element tree it returns.
//!
//! ## Usage scenarios
//!
//! Two scenarios mirror how the engine is meant to be extended:
//! - a stylesheet field compiled by a `before` hook and applied through the
//!   `@stylesheet` directive
//! - a messages field whose `after` hook wraps the whole tree in a provider

use std::sync::{Arc, Mutex};

use serde_json::json;
use trellis_api::{Component, ComponentType, Content, Element, Node, Payload, Value};
use trellis_kernel::{Engine, EngineConfig, RenderError, Stage};

#[derive(Debug)]
struct Foo;

impl Component for Foo {}

#[derive(Debug)]
struct Bar;

impl Component for Bar {}

#[derive(Debug)]
struct IntlProvider;

impl Component for IntlProvider {}

/// Test harness owning an engine and rendering JSON fixtures through it.
struct RenderTest {
    engine: Engine,
}

impl RenderTest {
    fn new() -> Self {
        let mut engine = Engine::new();
        engine
            .register("Foo", ComponentType::custom(Foo))
            .register("Bar", ComponentType::custom(Bar));
        Self { engine }
    }

    /// Render a payload and return the tree, failing the test on error or on
    /// a missing tree.
    fn render(&self, payload: serde_json::Value) -> Element {
        let result = self.engine.render(payload);
        assert!(result.is_ok(), "Render failed: {:?}", result.err());
        result.unwrap().expect("payload produced no tree")
    }

    fn render_err(&self, payload: serde_json::Value) -> RenderError {
        self.engine
            .render(payload)
            .expect_err("render should have failed")
    }
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_override() {
    let mut test = RenderTest::new();
    let tree = test.render(json!({ "layout": ["Foo"] }));
    assert_eq!(tree.component.display_name(), "Foo");

    let bar = ComponentType::custom(Bar);
    test.engine.register("Foo", bar.clone());
    let tree = test.render(json!({ "layout": ["Foo"] }));
    assert_eq!(tree.component, bar);
}

#[test]
fn test_name_inference() {
    let mut explicit = Engine::new();
    let mut inferred = Engine::new();
    let bar = ComponentType::custom(Bar);
    explicit.register("Bar", bar.clone());
    inferred.register_component(bar.clone());

    assert_eq!(explicit.components().get("Bar"), Some(&bar));
    assert_eq!(inferred.components().get("Bar"), Some(&bar));
}

#[test]
fn test_unregistered_name_is_intrinsic() {
    let test = RenderTest::new();
    let tree = test.render(json!({ "layout": ["section", { "id": "main" }] }));
    assert_eq!(tree.component, ComponentType::intrinsic("section"));
    assert_eq!(tree.prop("id"), Some(&Value::from("main")));
}

// ============================================================================
// Tree shape
// ============================================================================

#[test]
fn test_empty_layout_is_fragment() {
    let test = RenderTest::new();
    let tree = test.render(json!({ "layout": [] }));
    assert!(tree.component.is_fragment());
    assert!(tree.props.is_empty());
    assert_eq!(tree.content, Content::Empty);
}

#[test]
fn test_component_with_props() {
    let test = RenderTest::new();
    let tree = test.render(json!({ "layout": ["Foo", { "foo": "bar" }] }));
    assert_eq!(tree.component.display_name(), "Foo");
    assert_eq!(tree.props.len(), 1);
    assert_eq!(tree.prop("foo"), Some(&Value::from("bar")));
}

#[test]
fn test_text_children() {
    let test = RenderTest::new();
    let tree = test.render(json!({ "layout": ["p", "hello"] }));
    assert_eq!(tree.component, ComponentType::intrinsic("p"));
    assert_eq!(tree.text(), Some("hello"));
    assert!(tree.children().is_empty());
}

#[test]
fn test_sparse_children_preserved() {
    let test = RenderTest::new();
    let tree = test.render(json!({ "layout": ["div", {}, [null, ["div"]]] }));
    let children = tree.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], Node::Value(Value::Null));
    let child = children[1].as_element().expect("second entry is an element");
    assert_eq!(child.component, ComponentType::intrinsic("div"));
    assert_eq!(child.key, "/div[1]/div[1]");
}

#[test]
fn test_nested_tree() {
    let test = RenderTest::new();
    let tree = test.render(json!({
        "layout": ["Foo", [
            ["Bar", { "n": 1 }],
            ["Bar", { "n": 2 }, "text"],
            ["ul", [["li", "a"], ["li", "b"]]]
        ]]
    }));

    let kids: Vec<&Element> = tree.child_elements().collect();
    assert_eq!(kids.len(), 3);
    assert_eq!(kids[0].key, "/Foo[1]/Bar[1]");
    assert_eq!(kids[1].key, "/Foo[1]/Bar[2]");
    assert_eq!(kids[1].text(), Some("text"));

    let items: Vec<&str> = kids[2].child_elements().filter_map(Element::text).collect();
    assert_eq!(items, vec!["a", "b"]);
    let keys: Vec<&str> = kids[2].child_elements().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["/Foo[1]/ul[1]/li[1]", "/Foo[1]/ul[1]/li[2]"]);
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_explicit_key_wins() {
    let test = RenderTest::new();
    let tree = test.render(json!({ "layout": ["Foo", { "key": "k1" }] }));
    assert_eq!(tree.key, "k1");
    assert!(tree.prop("key").is_none());
}

#[test]
fn test_keys_are_deterministic() {
    let test = RenderTest::new();
    let payload = json!({ "layout": ["div", [["span"], ["span"], ["p", [["span"]]]]] });
    let first = test.render(payload.clone());
    let second = test.render(payload);
    assert_eq!(first, second);
}

// ============================================================================
// Input forms
// ============================================================================

#[test]
fn test_serialized_round_trip() {
    let test = RenderTest::new();
    let payload = json!({
        "title": "home",
        "layout": ["Foo", { "a": 1, "b": [1, 2] }, [["Bar", "x"], null, ["p", { "key": "k" }]]]
    });

    let structured = test.engine.render(payload.clone()).unwrap();
    let serialized = test.engine.render(payload.to_string()).unwrap();
    assert_eq!(structured, serialized);
}

#[test]
fn test_parses_stringified_json() {
    let test = RenderTest::new();
    let tree = test.engine.render(r#"{"layout":[]}"#).unwrap().unwrap();
    assert!(tree.component.is_fragment());
}

#[test]
fn test_payload_input() {
    let test = RenderTest::new();
    let mut payload = Payload::new();
    payload.insert("layout", Value::from(json!(["Bar"])));
    let tree = test.engine.render(payload).unwrap().unwrap();
    assert_eq!(tree.key, "/Bar[1]");
}

#[test]
fn test_direct_component_reference() {
    let test = RenderTest::new();
    let foo = ComponentType::custom(Foo);
    let layout = Value::List(vec![Value::Component(foo.clone())]);
    let payload: Payload = [("layout", layout)].into_iter().collect();

    let tree = test.engine.render(payload).unwrap().unwrap();
    assert_eq!(tree.component, foo);
    assert_eq!(tree.key, "/Foo[1]");
}

#[test]
fn test_custom_layout_field() {
    let engine = Engine::with_config(EngineConfig::default().with_layout_field("screen"));
    let tree = engine
        .render(json!({ "screen": ["View"], "layout": ["Ignored"] }))
        .unwrap()
        .unwrap();
    assert_eq!(tree.key, "/View[1]");
}

#[test]
fn test_missing_layout_is_none() {
    let test = RenderTest::new();
    assert!(test.engine.render(json!({ "other": 1 })).unwrap().is_none());
    assert!(test.engine.render(json!({ "layout": null })).unwrap().is_none());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_malformed_payload() {
    let test = RenderTest::new();
    let err = test.engine.render("{ layout: ").unwrap_err();
    assert!(matches!(err, RenderError::MalformedPayload(_)));
    assert!(err.to_string().starts_with("malformed payload"));
}

#[test]
fn test_invalid_layout_root() {
    let test = RenderTest::new();
    let err = test.render_err(json!({ "layout": "Foo" }));
    assert_eq!(err.to_string(), "layout root must be a list, found string");
}

#[test]
fn test_hook_error_propagates() {
    let mut test = RenderTest::new();
    test.engine
        .modify("width", |_, _| Err(anyhow::anyhow!("width must be positive")));

    let err = test.render_err(json!({ "layout": ["div", [["div", { "width": -1 }]]] }));
    match err {
        RenderError::Hook { stage, name, source } => {
            assert_eq!(stage, Stage::Modify);
            assert_eq!(name, "width");
            assert_eq!(source.to_string(), "width must be positive");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ============================================================================
// Hooks
// ============================================================================

#[test]
fn test_hook_accumulation_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut test = RenderTest::new();
    for tag in ["f1", "f2"] {
        let calls = Arc::clone(&calls);
        test.engine.before("x", move |value, _| {
            calls.lock().unwrap().push(tag);
            Ok(Some(Value::from(format!("{}{}", value.to_text(), tag))))
        });
    }
    let seen = Arc::new(Mutex::new(Value::Null));
    let sink = Arc::clone(&seen);
    test.engine.after("x", move |_, value| {
        *sink.lock().unwrap() = value.clone();
        Ok(None)
    });

    test.render(json!({ "x": "", "layout": ["div"] }));
    assert_eq!(*calls.lock().unwrap(), vec!["f1", "f2"]);
    assert_eq!(*seen.lock().unwrap(), Value::from("f1f2"));
}

#[test]
fn test_before_rewrites_layout() {
    let mut test = RenderTest::new();
    test.engine.before("layout", |layout, _| {
        Ok(Some(Value::List(vec![
            Value::from("main"),
            Value::Record(Default::default()),
            Value::List(vec![layout.clone()]),
        ])))
    });

    let tree = test.render(json!({ "layout": ["Foo"] }));
    assert_eq!(tree.key, "/main[1]");
    assert_eq!(tree.child_elements().next().unwrap().key, "/main[1]/Foo[1]");
}

#[test]
fn test_directive_stripping() {
    let mut test = RenderTest::new();
    test.engine
        .modify("@stylesheet", |_, _| Ok(Some(Value::from("returned"))));
    let tree = test.render(json!({ "layout": ["View", { "@stylesheet": "square" }] }));
    assert!(tree.prop("@stylesheet").is_none());
    assert!(tree.props.is_empty());
}

#[test]
fn test_clear_resets_engine() {
    let mut test = RenderTest::new();
    test.engine.after("layout", |_, _| Err(anyhow::anyhow!("stale hook")));
    test.engine.clear();

    let tree = test.render(json!({ "layout": ["Foo"] }));
    assert_eq!(tree.component, ComponentType::intrinsic("Foo"));
}

// ============================================================================
// Usage scenarios
// ============================================================================

#[test]
fn test_stylesheet_directive() {
    let mut test = RenderTest::new();
    test.engine
        .register("View", "View")
        // Compile the stylesheet: mark every style as resolved.
        .before("stylesheet", |sheet, _| {
            let mut compiled = sheet.clone();
            if let Some(styles) = compiled.as_record_mut() {
                for style in styles.values_mut() {
                    if let Some(style) = style.as_record_mut() {
                        style.insert("compiled".to_string(), Value::Bool(true));
                    }
                }
            }
            Ok(Some(compiled))
        })
        .modify("@stylesheet", |reference, ctx| {
            let style = ctx
                .field()
                .and_then(|sheet| sheet.get(&reference.to_text()))
                .cloned()
                .unwrap_or_default();
            ctx.set_prop("style", style)?;
            Ok(None)
        });

    let tree = test.render(json!({
        "stylesheet": {
            "square": { "backgroundColor": "red", "height": 100, "width": 100 }
        },
        "layout": ["View", { "@stylesheet": "square" }]
    }));

    assert!(tree.prop("@stylesheet").is_none());
    let style = tree.prop("style").and_then(Value::as_record).expect("style applied");
    assert_eq!(style.get("backgroundColor"), Some(&Value::from("red")));
    assert_eq!(style.get("width"), Some(&Value::Int(100)));
    assert_eq!(style.get("compiled"), Some(&Value::Bool(true)));
}

#[test]
fn test_messages_provider_wraps_tree() {
    let mut test = RenderTest::new();
    let provider = ComponentType::custom(IntlProvider);
    let wrapper = provider.clone();
    test.engine
        .register("FormattedMessage", "FormattedMessage")
        .after("messages", move |tree, messages| {
            let wrapped = Element::new(wrapper.clone(), "/IntlProvider[1]")
                .with_prop("locale", "en")
                .with_prop("messages", messages.clone())
                .with_children(vec![tree.clone().into()]);
            Ok(Some(wrapped))
        });

    let tree = test.render(json!({
        "messages": { "foo": "bar" },
        "layout": ["p", [["FormattedMessage", { "id": "foo" }]]]
    }));

    assert_eq!(tree.component, provider);
    assert_eq!(tree.prop("messages"), Some(&Value::from(json!({ "foo": "bar" }))));

    let paragraph = tree.child_elements().next().expect("wrapped tree");
    assert_eq!(paragraph.component, ComponentType::intrinsic("p"));
    let message = paragraph.child_elements().next().expect("message child");
    assert_eq!(message.key, "/p[1]/FormattedMessage[1]");
    assert_eq!(message.prop("id"), Some(&Value::from("foo")));
}

#[test]
fn test_extension_bundles_registrations() {
    fn intl(engine: &mut Engine) {
        engine.after("messages", |tree, _| {
            Ok(Some(Element::new("Provider", "/Provider[1]").with_children(vec![tree.clone().into()])))
        });
    }

    let mut test = RenderTest::new();
    test.engine.use_extension(intl);
    let tree = test.render(json!({ "messages": {}, "layout": ["Foo"] }));
    assert_eq!(tree.key, "/Provider[1]");
    assert_eq!(tree.to_json()["children"][0]["key"], json!("/Foo[1]"));
}
