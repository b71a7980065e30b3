/// Extract a clean error message from an API error body
///
/// The price API answers failures either with plain text or with a JSON
/// object such as:
/// `{"timestamp":"...","status":400,"error":"Bad Request","message":"Alert already exists"}`
///
/// Returns only the meaningful message:
/// "Alert already exists"
pub fn extract_clean_error(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return msg.trim().to_string();
                }
            }
        }
    }
    trimmed.to_string()
}
