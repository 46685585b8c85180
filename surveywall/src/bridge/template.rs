//! Survey document rendering.
//!
//! The embedded surface loads one HTML document built from a bundled
//! template by substituting the publisher id, the JSON-encoded widget
//! options, and a base64-encoded loader image.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// The bundled survey document template.
const TEMPLATE: &str = include_str!("template.html");

/// Base64 of the built-in loader image (a 1×1 placeholder PNG) used when the
/// host supplies no spinner of its own.
pub const DEFAULT_LOADER_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Render the survey document.
///
/// # Arguments
///
/// * `publisher` - Publisher identifier
/// * `option_json` - JSON-encoded widget options blob
/// * `loader_base64` - Base64-encoded loader image bytes
pub fn render_survey_html(publisher: &str, option_json: &str, loader_base64: &str) -> String {
    TEMPLATE
        .replace("[PUBLISHER_ID]", publisher)
        .replace("[OPTION]", option_json)
        .replace("[LOADER_BASE64]", loader_base64)
}

/// Base64-encode caller-supplied loader image bytes.
pub fn encode_loader(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let html = render_survey_html("pub-1", r#"{"brand":"Acme"}"#, DEFAULT_LOADER_BASE64);

        assert!(html.contains(r#"option.publisher = "pub-1";"#));
        assert!(html.contains(r#"var option = {"brand":"Acme"};"#));
        assert!(html.contains(DEFAULT_LOADER_BASE64));
        assert!(!html.contains("[PUBLISHER_ID]"));
        assert!(!html.contains("[OPTION]"));
        assert!(!html.contains("[LOADER_BASE64]"));
    }

    #[test]
    fn test_template_lists_full_vocabulary() {
        for name in [
            "load",
            "interviewComplete",
            "interviewSkip",
            "interviewStart",
            "noSurveyAvailable",
            "fail",
            "ready",
            "log",
        ] {
            assert!(TEMPLATE.contains(name), "template missing event {}", name);
        }
    }

    #[test]
    fn test_encode_loader_round_trip() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let bytes = [0x89, 0x50, 0x4e, 0x47];
        let encoded = encode_loader(&bytes);
        assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
    }

    #[test]
    fn test_default_loader_is_valid_base64() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let decoded = STANDARD.decode(DEFAULT_LOADER_BASE64).unwrap();
        // PNG signature.
        assert_eq!(&decoded[..4], &[0x89, 0x50, 0x4e, 0x47]);
    }
}
