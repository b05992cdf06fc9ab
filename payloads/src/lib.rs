//! Chat payload model and JSON codec for the call chat channel.
//!
//! This crate owns the wire representation of everything the call sends
//! through the transport's chat channel. Every payload is a JSON object with
//! a mandatory `type` discriminant; anything else that arrives on the channel
//! is treated as legacy or foreign plain text and surfaces as
//! [`Payload::Unparsable`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire key carrying the payload discriminant.
pub const TYPE_FIELD: &str = "type";

/// Error returned by [`encode`] and [`try_decode`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not JSON, or a known payload is missing required fields.
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The text is JSON but carries no string `type` field.
    #[error("payload has no type discriminant")]
    MissingType,
    /// The `type` field names a payload kind this codec does not know.
    #[error("unknown payload type: {0}")]
    UnknownType(String),
    /// [`Payload::Unparsable`] only exists on the decode side.
    #[error("unparsable payloads cannot be encoded")]
    NotEncodable,
}

/// Discriminant of a [`Payload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Chat,
    MoneyTransfer,
    Question,
    CorrectAnswer,
    Unparsable,
}

impl PayloadKind {
    /// Wire name of the kind. `Unparsable` has no wire form and reports `"unparsable"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::MoneyTransfer => "moneyTransfer",
            Self::Question => "question",
            Self::CorrectAnswer => "correctAnswer",
            Self::Unparsable => "unparsable",
        }
    }

    fn from_wire(name: &str) -> Option<Self> {
        match name {
            "chat" => Some(Self::Chat),
            "moneyTransfer" => Some(Self::MoneyTransfer),
            "question" => Some(Self::Question),
            "correctAnswer" => Some(Self::CorrectAnswer),
            _ => None,
        }
    }
}

/// Typed interpretation of a chat message's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Plain chat line.
    Chat { sender_name: String, text: String },
    /// Announcement of a completed wallet token transfer.
    MoneyTransfer { sender_name: String, amount: String, recipient: String },
    /// Quiz question broadcast by the quiz host.
    Question { question: String, answer: String },
    /// Notice that a participant answered the standing question.
    CorrectAnswer { display_name: String },
    /// Text that failed structural decoding, kept verbatim.
    Unparsable { raw_text: String },
}

impl Payload {
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Chat { .. } => PayloadKind::Chat,
            Self::MoneyTransfer { .. } => PayloadKind::MoneyTransfer,
            Self::Question { .. } => PayloadKind::Question,
            Self::CorrectAnswer { .. } => PayloadKind::CorrectAnswer,
            Self::Unparsable { .. } => PayloadKind::Unparsable,
        }
    }

    /// Convenience constructor for a chat line.
    pub fn chat(sender_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Chat { sender_name: sender_name.into(), text: text.into() }
    }
}

/// Encode a payload into its transport string.
///
/// # Errors
///
/// Returns [`CodecError::NotEncodable`] for [`Payload::Unparsable`].
pub fn encode(payload: &Payload) -> Result<String, CodecError> {
    let wire = payload_to_wire(payload).ok_or(CodecError::NotEncodable)?;
    Ok(serde_json::to_string(&wire)?)
}

/// Strictly decode a transport string.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for non-JSON text or missing fields,
/// [`CodecError::MissingType`] when there is no string `type`, and
/// [`CodecError::UnknownType`] for discriminants outside the known set.
pub fn try_decode(text: &str) -> Result<Payload, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(name) = value.get(TYPE_FIELD).and_then(Value::as_str) else {
        return Err(CodecError::MissingType);
    };
    if PayloadKind::from_wire(name).is_none() {
        return Err(CodecError::UnknownType(name.to_owned()));
    }

    let wire: WirePayload = serde_json::from_value(value)?;
    Ok(wire_to_payload(wire))
}

/// Decode a transport string, falling back to [`Payload::Unparsable`].
///
/// Total over all inputs: never fails and never panics.
#[must_use]
pub fn decode(text: &str) -> Payload {
    try_decode(text).unwrap_or_else(|_| Payload::Unparsable { raw_text: text.to_owned() })
}

fn payload_to_wire(payload: &Payload) -> Option<WirePayloadRef<'_>> {
    let wire = match payload {
        Payload::Chat { sender_name, text } => WirePayloadRef::Chat { sender_name, text },
        Payload::MoneyTransfer { sender_name, amount, recipient } => {
            WirePayloadRef::MoneyTransfer { sender_name, amount, recipient }
        }
        Payload::Question { question, answer } => WirePayloadRef::Question { question, answer },
        Payload::CorrectAnswer { display_name } => WirePayloadRef::CorrectAnswer { display_name },
        Payload::Unparsable { .. } => return None,
    };
    Some(wire)
}

fn wire_to_payload(wire: WirePayload) -> Payload {
    match wire {
        WirePayload::Chat { sender_name, text } => Payload::Chat { sender_name, text },
        WirePayload::MoneyTransfer { sender_name, amount, recipient } => {
            Payload::MoneyTransfer { sender_name, amount, recipient }
        }
        WirePayload::Question { question, answer } => Payload::Question { question, answer },
        WirePayload::CorrectAnswer { display_name } => Payload::CorrectAnswer { display_name },
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WirePayloadRef<'a> {
    #[serde(rename_all = "camelCase")]
    Chat { sender_name: &'a str, text: &'a str },
    #[serde(rename_all = "camelCase")]
    MoneyTransfer { sender_name: &'a str, amount: &'a str, recipient: &'a str },
    Question { question: &'a str, answer: &'a str },
    #[serde(rename_all = "camelCase")]
    CorrectAnswer { display_name: &'a str },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WirePayload {
    #[serde(rename_all = "camelCase")]
    Chat { sender_name: String, text: String },
    // Older clients announced transfers without a sender.
    #[serde(rename_all = "camelCase")]
    MoneyTransfer {
        #[serde(default)]
        sender_name: String,
        amount: String,
        recipient: String,
    },
    Question { question: String, answer: String },
    #[serde(rename_all = "camelCase")]
    CorrectAnswer { display_name: String },
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
