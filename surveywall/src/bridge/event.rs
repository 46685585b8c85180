//! Bridge event vocabulary and typed payloads.

use serde_json::Value;

/// One raw message delivered by the embedded-content surface.
#[derive(Debug, Clone)]
pub struct SurfaceMessage {
    /// Event name as emitted by the widget.
    pub name: String,
    /// Structured payload; `Value::Null` when the widget sent none.
    pub payload: Value,
}

impl SurfaceMessage {
    /// Create a message.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// The closed vocabulary of events the widget can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Survey wall finished loading; payload carries the monetizable status.
    Load,
    /// The interview finished.
    InterviewComplete,
    /// The interview was skipped.
    InterviewSkip,
    /// The interview started.
    InterviewStart,
    /// No survey could be offered.
    NoSurveyAvailable,
    /// The widget failed internally.
    Fail,
    /// The widget is ready to start the interview.
    Ready,
    /// Diagnostic line from the widget.
    Log,
}

impl EventKind {
    /// Every known event, in subscription order.
    pub const ALL: [EventKind; 8] = [
        EventKind::Load,
        EventKind::InterviewComplete,
        EventKind::InterviewSkip,
        EventKind::InterviewStart,
        EventKind::NoSurveyAvailable,
        EventKind::Fail,
        EventKind::Ready,
        EventKind::Log,
    ];

    /// Wire name of this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::InterviewComplete => "interviewComplete",
            Self::InterviewSkip => "interviewSkip",
            Self::InterviewStart => "interviewStart",
            Self::NoSurveyAvailable => "noSurveyAvailable",
            Self::Fail => "fail",
            Self::Ready => "ready",
            Self::Log => "log",
        }
    }

    /// Parse a wire name; `None` for names outside the vocabulary.
    pub fn from_name(name: &str) -> Option<Self> {
        EventKind::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed payload of a `load` event.
///
/// The widget reports whether the loaded wall is monetizable. Payloads that
/// are not JSON objects carry no status at all and trigger nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPayload {
    /// The reported status string, if any.
    pub status: Option<String>,
}

impl LoadPayload {
    /// Parse a `load` payload. Returns `None` for non-object payloads.
    pub fn from_value(payload: &Value) -> Option<Self> {
        let object = payload.as_object()?;
        Some(Self {
            status: object
                .get("status")
                .and_then(Value::as_str)
                .map(String::from),
        })
    }

    /// Returns true if the wall can run a paid interview.
    pub fn is_monetizable(&self) -> bool {
        self.status.as_deref() == Some("monetizable")
    }
}

/// A surface message parsed against the event vocabulary.
///
/// Unknown names are preserved rather than dropped so a future widget
/// revision cannot silently break dispatch diagnostics.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// `load` with its typed payload (`None` when the payload had no shape).
    Load(Option<LoadPayload>),
    /// `interviewComplete`.
    InterviewComplete,
    /// `interviewSkip`.
    InterviewSkip,
    /// `interviewStart`.
    InterviewStart,
    /// `noSurveyAvailable`.
    NoSurveyAvailable,
    /// `fail` with the raw payload.
    Fail(Value),
    /// `ready`.
    Ready,
    /// `log` with the raw payload.
    Log(Value),
    /// An event name outside the vocabulary.
    Unknown {
        /// The unrecognized name.
        name: String,
        /// Its payload, untouched.
        payload: Value,
    },
}

impl BridgeEvent {
    /// Parse a raw surface message.
    pub fn from_message(message: &SurfaceMessage) -> Self {
        match EventKind::from_name(&message.name) {
            Some(EventKind::Load) => Self::Load(LoadPayload::from_value(&message.payload)),
            Some(EventKind::InterviewComplete) => Self::InterviewComplete,
            Some(EventKind::InterviewSkip) => Self::InterviewSkip,
            Some(EventKind::InterviewStart) => Self::InterviewStart,
            Some(EventKind::NoSurveyAvailable) => Self::NoSurveyAvailable,
            Some(EventKind::Fail) => Self::Fail(message.payload.clone()),
            Some(EventKind::Ready) => Self::Ready,
            Some(EventKind::Log) => Self::Log(message.payload.clone()),
            None => Self::Unknown {
                name: message.name.clone(),
                payload: message.payload.clone(),
            },
        }
    }

    /// The vocabulary entry this event maps to; `None` for unknown events.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Load(_) => Some(EventKind::Load),
            Self::InterviewComplete => Some(EventKind::InterviewComplete),
            Self::InterviewSkip => Some(EventKind::InterviewSkip),
            Self::InterviewStart => Some(EventKind::InterviewStart),
            Self::NoSurveyAvailable => Some(EventKind::NoSurveyAvailable),
            Self::Fail(_) => Some(EventKind::Fail),
            Self::Ready => Some(EventKind::Ready),
            Self::Log(_) => Some(EventKind::Log),
            Self::Unknown { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert_eq!(EventKind::from_name("surveyExploded"), None);
        assert_eq!(EventKind::from_name(""), None);
        // Names are case sensitive.
        assert_eq!(EventKind::from_name("Load"), None);
    }

    #[test]
    fn test_load_payload_monetizable() {
        let payload = LoadPayload::from_value(&json!({"status": "monetizable"})).unwrap();
        assert!(payload.is_monetizable());
    }

    #[test]
    fn test_load_payload_other_status() {
        let payload = LoadPayload::from_value(&json!({"status": "nonmonetizable"})).unwrap();
        assert!(!payload.is_monetizable());

        let payload = LoadPayload::from_value(&json!({})).unwrap();
        assert_eq!(payload.status, None);
        assert!(!payload.is_monetizable());
    }

    #[test]
    fn test_load_payload_rejects_non_objects() {
        assert_eq!(LoadPayload::from_value(&json!("monetizable")), None);
        assert_eq!(LoadPayload::from_value(&Value::Null), None);
        assert_eq!(LoadPayload::from_value(&json!([1, 2])), None);
    }

    #[test]
    fn test_bridge_event_parse() {
        let event =
            BridgeEvent::from_message(&SurfaceMessage::new("interviewComplete", Value::Null));
        assert!(matches!(event, BridgeEvent::InterviewComplete));
        assert_eq!(event.kind(), Some(EventKind::InterviewComplete));

        let event = BridgeEvent::from_message(&SurfaceMessage::new(
            "load",
            json!({"status": "monetizable"}),
        ));
        match event {
            BridgeEvent::Load(Some(payload)) => assert!(payload.is_monetizable()),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_bridge_event_unknown_fallback() {
        let event = BridgeEvent::from_message(&SurfaceMessage::new("mystery", json!(42)));
        match &event {
            BridgeEvent::Unknown { name, payload } => {
                assert_eq!(name, "mystery");
                assert_eq!(payload, &json!(42));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(event.kind(), None);
    }
}
