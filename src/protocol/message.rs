//! A2A message types

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A message as submitted by an A2A client
///
/// Incoming messages are accepted leniently: a missing role defaults to
/// [`Role::User`], and a `parts` field that is absent or not an array is kept
/// as `None` so that it flattens to empty content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    #[serde(default, deserialize_with = "role_or_default")]
    pub role: Role,

    /// Message content parts, `None` when absent or malformed
    #[serde(
        default,
        deserialize_with = "parts_if_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub parts: Option<Vec<Part>>,

    /// Optional message identifier
    #[serde(
        rename = "messageId",
        default,
        deserialize_with = "opaque_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<String>,

    /// Optional task identifier (for associating message with a task)
    #[serde(
        rename = "taskId",
        default,
        deserialize_with = "opaque_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_id: Option<String>,
}

impl Message {
    /// Create a new message with text content
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: Some(vec![Part::text(text)]),
            message_id: None,
            task_id: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Add a message part
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.get_or_insert_with(Vec::new).push(part);
        self
    }

    /// Set the message ID
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// Set the task ID
    pub fn with_task_id(mut self, id: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self
    }

    /// Parts of the message, empty when none were supplied
    pub fn parts(&self) -> &[Part] {
        self.parts.as_deref().unwrap_or_default()
    }

    /// Flattened text content of the message
    ///
    /// Each part contributes its [`Part::flatten`] form, joined with newlines.
    pub fn content(&self) -> String {
        flatten_parts(self.parts())
    }
}

/// Join the flattened form of each part with newline separators
pub fn flatten_parts(parts: &[Part]) -> String {
    parts
        .iter()
        .map(Part::flatten)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Role of a message sender
///
/// `user` and `agent` are the roles defined by A2A; any other role string a
/// client sends is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Role {
    /// Message from a user
    #[default]
    User,

    /// Message from an AI agent
    Agent,

    /// Any other role string
    Other(String),
}

impl Role {
    /// Wire representation of the role
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "" | "user" => Role::User,
            "agent" => Role::Agent,
            _ => Role::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Role::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Role::from)
    }
}

fn role_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Role, D::Error> {
    let role = Option::<String>::deserialize(deserializer)?;
    Ok(role.map(Role::from).unwrap_or_default())
}

fn parts_if_sequence<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Part>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(items.into_iter().map(Part::from).collect())),
        _ => Ok(None),
    }
}

/// Read a client-supplied identifier
///
/// Identifiers are opaque: strings are taken as-is and other scalars are kept
/// in their JSON text form, so `42` becomes `"42"`. Null reads as absent.
pub(crate) fn opaque_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(id) => Ok(Some(id)),
        scalar @ (Value::Number(_) | Value::Bool(_)) => Ok(Some(scalar.to_string())),
        other => Err(D::Error::custom(format!(
            "invalid identifier {other}, expected a string or number"
        ))),
    }
}

/// A part of a message, discriminated by its `kind` field
///
/// Parts whose `kind` is not recognised, or whose payload does not match the
/// declared kind, are kept verbatim as [`Part::Unknown`] so they survive into
/// the task history. Recognised parts keep any other fields they carry, such
/// as `metadata`, in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Value", into = "Value")]
pub enum Part {
    /// Text content
    Text {
        /// The text content
        text: String,

        /// Remaining fields of the part
        extra: Map<String, Value>,
    },

    /// Structured data
    Data {
        /// The structured data
        data: Value,

        /// Remaining fields of the part
        extra: Map<String, Value>,
    },

    /// Any other part, preserved as received
    Unknown(Value),
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            extra: Map::new(),
        }
    }

    /// Create a data part
    pub fn data(data: Value) -> Self {
        Self::Data {
            data,
            extra: Map::new(),
        }
    }

    /// Attach `metadata` to a text or data part
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        if let Part::Text { extra, .. } | Part::Data { extra, .. } = &mut self {
            extra.insert("metadata".into(), metadata);
        }
        self
    }

    /// Flattened content contributed by this part
    ///
    /// Text parts yield their text, data parts their compact JSON encoding,
    /// and unknown parts the empty string.
    pub fn flatten(&self) -> String {
        match self {
            Part::Text { text, .. } => text.clone(),
            Part::Data { data, .. } => data.to_string(),
            Part::Unknown(_) => String::new(),
        }
    }
}

impl From<Value> for Part {
    fn from(value: Value) -> Self {
        let Value::Object(obj) = value else {
            return Part::Unknown(value);
        };

        let kind = obj.get("kind").and_then(Value::as_str).map(str::to_owned);
        match kind.as_deref() {
            Some("text") => match obj.get("text").and_then(Value::as_str).map(str::to_owned) {
                Some(text) => Part::Text {
                    text,
                    extra: extra_fields(obj, "text"),
                },
                None => Part::Unknown(Value::Object(obj)),
            },
            Some("data") => match obj.get("data").cloned() {
                Some(data) => Part::Data {
                    data,
                    extra: extra_fields(obj, "data"),
                },
                None => Part::Unknown(Value::Object(obj)),
            },
            _ => Part::Unknown(Value::Object(obj)),
        }
    }
}

impl From<Part> for Value {
    fn from(part: Part) -> Self {
        match part {
            Part::Text { text, extra } => tagged("text", Value::from(text), extra),
            Part::Data { data, extra } => tagged("data", data, extra),
            Part::Unknown(raw) => raw,
        }
    }
}

fn extra_fields(obj: Map<String, Value>, payload: &str) -> Map<String, Value> {
    obj.into_iter()
        .filter(|(key, _)| key != "kind" && key != payload)
        .collect()
}

/// `kind` first, then the payload under the field named after it
fn tagged(kind: &str, payload: Value, extra: Map<String, Value>) -> Value {
    let mut obj = Map::new();
    obj.insert("kind".into(), Value::from(kind));
    obj.insert(kind.into(), payload);
    obj.extend(extra);
    Value::Object(obj)
}
