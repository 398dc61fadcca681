//! Elements - the constructed output tree handed to a renderer.

use serde::Serialize;

use crate::value::record_to_json;
use crate::{ComponentType, Props, Value};

/// A constructed node: a typed component with resolved properties.
///
/// The `key` identifies the node among its siblings and is kept apart from
/// `props`; renderers use it for identity, never as a visible property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub component: ComponentType,
    pub key: String,
    pub props: Props,
    #[serde(rename = "children", skip_serializing_if = "Content::is_empty")]
    pub content: Content,
}

/// What an element contains. Text and child nodes never mix.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Children(Vec<Node>),
}

/// One entry of an element's child sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    /// An entry that was not a layout node, kept as authored.
    /// Falsy placeholders (`null`, `false`) end up here.
    Value(Value),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }
}

impl Element {
    /// Create an element with no properties and no content.
    pub fn new(component: impl Into<ComponentType>, key: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            key: key.into(),
            props: Props::new(),
            content: Content::Empty,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.content = Content::Children(children);
        self
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Text content, if this element holds text.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// All child entries, including pass-through values.
    pub fn children(&self) -> &[Node] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Child entries that are elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children().iter().filter_map(Node::as_element)
    }

    /// JSON form, the same shape `Serialize` produces.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "type".to_string(),
            serde_json::Value::String(self.component.display_name().to_string()),
        );
        map.insert("key".to_string(), serde_json::Value::String(self.key.clone()));
        map.insert("props".to_string(), serde_json::Value::Object(record_to_json(&self.props)));
        match &self.content {
            Content::Empty => {}
            Content::Text(text) => {
                map.insert("children".to_string(), serde_json::Value::String(text.clone()));
            }
            Content::Children(children) => {
                let children = children.iter().map(Node::to_json).collect();
                map.insert("children".to_string(), serde_json::Value::Array(children));
            }
        }
        serde_json::Value::Object(map)
    }
}

impl Node {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Element(element) => element.to_json(),
            Node::Value(value) => value.to_json(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Value(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_helpers() {
        let element = Element::new("p", "/p[1]")
            .with_prop("id", "intro")
            .with_text("hello");
        assert_eq!(element.component, ComponentType::intrinsic("p"));
        assert_eq!(element.prop("id"), Some(&Value::from("intro")));
        assert_eq!(element.text(), Some("hello"));
        assert!(element.children().is_empty());
    }

    #[test]
    fn test_children_filter_elements() {
        let element = Element::new(ComponentType::Fragment, "/Fragment[1]").with_children(vec![
            Node::Value(Value::Null),
            Element::new("div", "/Fragment[1]/div[1]").into(),
        ]);
        assert_eq!(element.children().len(), 2);
        let keys: Vec<&str> = element.child_elements().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["/Fragment[1]/div[1]"]);
    }

    #[test]
    fn test_serializes_to_json() {
        let element = Element::new("ul", "/ul[1]").with_children(vec![
            Element::new("li", "/ul[1]/li[1]").with_text("one").into(),
            Node::Value(Value::Bool(false)),
        ]);
        assert_eq!(
            element.to_json(),
            json!({
                "type": "ul",
                "key": "/ul[1]",
                "props": {},
                "children": [
                    { "type": "li", "key": "/ul[1]/li[1]", "props": {}, "children": "one" },
                    false
                ]
            })
        );
    }

    #[test]
    fn test_empty_content_is_omitted() {
        let json = Element::new(ComponentType::Fragment, "/Fragment[1]").to_json();
        assert_eq!(json, json!({ "type": "Fragment", "key": "/Fragment[1]", "props": {} }));
    }

    #[test]
    fn test_to_json_matches_serialize() {
        let element = Element::new("View", "/View[1]")
            .with_prop("width", 1.5)
            .with_prop("nested", Value::from(json!({ "a": [1, "two", null] })))
            .with_children(vec![
                Element::new("Text", "/View[1]/Text[1]").with_text("hi").into(),
                Node::Value(Value::Null),
            ]);
        assert_eq!(element.to_json(), serde_json::to_value(&element).unwrap());
    }
}
