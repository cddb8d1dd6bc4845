use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attribute carrying the application-side element id on an event target.
pub const ELEMENT_ID_ATTRIBUTE: &str = "data-element-id";

/// A node in the host document as referenced by an event. Only the attribute
/// map crosses the bridge; the node itself stays on the host side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNode {
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl EventNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A host-native UI event, delivered explicitly by the host's event hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostEvent {
    pub name: String,
    #[serde(default)]
    pub target: Option<EventNode>,
    #[serde(default)]
    pub current_target: Option<EventNode>,
}

impl HostEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            current_target: None,
        }
    }

    pub fn with_target(mut self, target: EventNode) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_current_target(mut self, current_target: EventNode) -> Self {
        self.current_target = Some(current_target);
        self
    }
}

/// The node an event is attributed to: the node whose listener is running
/// when present, otherwise the original target.
pub fn event_target(event: &HostEvent) -> Option<&EventNode> {
    event.current_target.as_ref().or(event.target.as_ref())
}

/// Application element id of the event's resolved target. Absent when the
/// host yields no target or the target carries no id attribute.
pub fn event_target_id(event: &HostEvent) -> Option<String> {
    event_target(event)?
        .attribute(ELEMENT_ID_ATTRIBUTE)
        .map(str::to_string)
}
