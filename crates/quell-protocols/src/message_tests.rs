use super::*;

#[test]
fn test_toggle_request_wire_format() {
    let request = UiRequest::Toggle { new_state: true };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["action"], "toggle");
    assert_eq!(json["newState"], true);
}

#[test]
fn test_get_toggle_state_wire_format() {
    let json = serde_json::to_string(&UiRequest::GetToggleState).unwrap();
    assert_eq!(json, r#"{"action":"getToggleState"}"#);
}

#[test]
fn test_run_full_quell_round_trip() {
    let json = r#"{"action":"runFullQuell","isActive":false}"#;
    let request: ContentRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request, ContentRequest::RunFullQuell { is_active: false });
}

#[test]
fn test_success_response_shape() {
    let json = serde_json::to_value(QuellResponse::success(4)).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["changesMade"], 4);
    assert!(json.get("error").is_none());
}

#[test]
fn test_failure_response_shape() {
    let response = QuellResponse::failure("Rewriter API not available");
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], false);
    assert!(json.get("changesMade").is_none());
    assert_eq!(json["error"], "Rewriter API not available");
}

#[test]
fn test_failure_response_missing_fields_deserialize() {
    let response: QuellResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
    assert!(response.success);
    assert!(response.changes_made.is_none());
    assert!(response.error.is_none());
}

#[test]
fn test_toggle_state_response() {
    let json = serde_json::to_string(&ToggleStateResponse { active: true }).unwrap();
    assert_eq!(json, r#"{"active":true}"#);
}
