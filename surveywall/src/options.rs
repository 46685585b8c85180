//! Caller-supplied survey options.
//!
//! A [`SurveyOptions`] value is assembled once with the builder methods and
//! then moved into an orchestrator; it is never mutated afterwards.

use serde_json::{Map, Value};

/// Options describing one survey request.
///
/// Only the publisher identifier is required. Everything else is optional
/// and omitted from the wire payloads when absent.
///
/// # Example
///
/// ```
/// use surveywall::options::SurveyOptions;
///
/// let options = SurveyOptions::new("publisher-uuid")
///     .with_brand("Acme")
///     .with_content_name("spring-lineup")
///     .with_send_postal_code(true);
/// ```
#[derive(Debug, Clone)]
pub struct SurveyOptions {
    /// Publisher identifier (required, non-empty).
    pub publisher: String,
    /// Brand label shown by the widget.
    pub brand: Option<String>,
    /// Explainer text shown by the widget.
    pub explainer: Option<String>,
    /// Content name reported with the interview.
    pub content_name: Option<String>,
    /// Advertising identifier; supplied only when tracking is permitted.
    pub mobile_ad_id: Option<String>,
    /// Explicit postal code override. When set, no resolution is attempted.
    pub postal_code: Option<String>,
    /// Whether a postal code should be resolved and sent at all.
    pub send_postal_code: bool,
    /// Preview token for widget debug sessions.
    pub preview: Option<String>,
}

impl SurveyOptions {
    /// Create options for the given publisher.
    pub fn new(publisher: impl Into<String>) -> Self {
        Self {
            publisher: publisher.into(),
            brand: None,
            explainer: None,
            content_name: None,
            mobile_ad_id: None,
            postal_code: None,
            send_postal_code: false,
            preview: None,
        }
    }

    /// Set the brand label.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the explainer text.
    pub fn with_explainer(mut self, explainer: impl Into<String>) -> Self {
        self.explainer = Some(explainer.into());
        self
    }

    /// Set the content name.
    pub fn with_content_name(mut self, content_name: impl Into<String>) -> Self {
        self.content_name = Some(content_name.into());
        self
    }

    /// Set the advertising identifier.
    ///
    /// Callers must only supply this when the platform permits tracking.
    pub fn with_mobile_ad_id(mut self, mobile_ad_id: impl Into<String>) -> Self {
        self.mobile_ad_id = Some(mobile_ad_id.into());
        self
    }

    /// Set an explicit postal code, bypassing cache and geolocation.
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Enable or disable postal-code resolution.
    pub fn with_send_postal_code(mut self, send: bool) -> Self {
        self.send_postal_code = send;
        self
    }

    /// Set a preview token.
    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    /// Payload for the availability-check request body.
    pub fn sdk_payload(&self, postal_code: Option<&str>) -> Value {
        let mut payload = Map::new();
        payload.insert("publisherUuid".into(), Value::from(self.publisher.clone()));
        insert_opt(&mut payload, "mobileAdId", self.mobile_ad_id.as_deref());
        insert_opt(&mut payload, "contentName", self.content_name.as_deref());
        insert_opt(&mut payload, "postalCode", postal_code);
        Value::Object(payload)
    }

    /// Options blob handed to the embedded widget.
    pub fn widget_payload(&self, postal_code: Option<&str>) -> Value {
        let mut payload = Map::new();
        insert_opt(&mut payload, "brand", self.brand.as_deref());
        insert_opt(&mut payload, "explainer", self.explainer.as_deref());
        insert_opt(&mut payload, "contentName", self.content_name.as_deref());
        insert_opt(&mut payload, "mobileAdId", self.mobile_ad_id.as_deref());
        insert_opt(&mut payload, "postalCode", postal_code);
        insert_opt(&mut payload, "preview", self.preview.as_deref());
        Value::Object(payload)
    }
}

fn insert_opt(payload: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        payload.insert(key.into(), Value::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_payload_minimal() {
        let options = SurveyOptions::new("pub-1");
        let payload = options.sdk_payload(None);

        assert_eq!(payload["publisherUuid"], "pub-1");
        assert!(payload.get("mobileAdId").is_none());
        assert!(payload.get("contentName").is_none());
        assert!(payload.get("postalCode").is_none());
    }

    #[test]
    fn test_sdk_payload_full() {
        let options = SurveyOptions::new("pub-1")
            .with_content_name("homepage")
            .with_mobile_ad_id("ad-id");
        let payload = options.sdk_payload(Some("94103"));

        assert_eq!(payload["publisherUuid"], "pub-1");
        assert_eq!(payload["contentName"], "homepage");
        assert_eq!(payload["mobileAdId"], "ad-id");
        assert_eq!(payload["postalCode"], "94103");
    }

    #[test]
    fn test_widget_payload_omits_absent_fields() {
        let options = SurveyOptions::new("pub-1").with_brand("Acme");
        let payload = options.widget_payload(None);

        assert_eq!(payload["brand"], "Acme");
        assert!(payload.get("explainer").is_none());
        assert!(payload.get("preview").is_none());
        // The publisher travels separately, via the template placeholder.
        assert!(payload.get("publisherUuid").is_none());
    }

    #[test]
    fn test_widget_payload_carries_preview_and_postal() {
        let options = SurveyOptions::new("pub-1").with_preview("token");
        let payload = options.widget_payload(Some("02139"));

        assert_eq!(payload["preview"], "token");
        assert_eq!(payload["postalCode"], "02139");
    }

    #[test]
    fn test_builder_chain() {
        let options = SurveyOptions::new("pub-1")
            .with_brand("Acme")
            .with_explainer("Answer a few questions")
            .with_postal_code("10001")
            .with_send_postal_code(true);

        assert_eq!(options.publisher, "pub-1");
        assert_eq!(options.brand.as_deref(), Some("Acme"));
        assert_eq!(options.explainer.as_deref(), Some("Answer a few questions"));
        assert_eq!(options.postal_code.as_deref(), Some("10001"));
        assert!(options.send_postal_code);
    }
}
