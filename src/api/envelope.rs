use serde::{Deserialize, Serialize};

/// `{success: true, data}` or `{success: false, message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, data: None, message: Some(message.into()) }
    }

    /// The payload of a successful envelope, or the failure message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("response carried no data".to_string()),
            (false, _) => Err(self.message.unwrap_or_else(|| "request failed".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_shape() {
        let value = serde_json::to_value(Envelope::ok(vec![1, 2])).unwrap();
        assert_eq!(value, json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn empty_data_is_still_success() {
        let env: Envelope<Vec<u8>> = serde_json::from_value(json!({ "success": true, "data": [] })).unwrap();
        assert_eq!(env.into_result(), Ok(vec![]));
    }

    #[test]
    fn failure_without_message() {
        let env: Envelope<Vec<u8>> = serde_json::from_value(json!({ "success": false })).unwrap();
        assert_eq!(env.into_result(), Err("request failed".to_string()));
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Branch {
        id: u64,
    }

    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Envelope<T> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_payloads_without_default() {
        let env: Envelope<Vec<Branch>> = decode(json!({ "success": true, "data": [{ "id": 4 }] }));
        assert_eq!(env.into_result(), Ok(vec![Branch { id: 4 }]));

        let env: Envelope<Branch> = decode(json!({ "success": false, "message": "Forbidden" }));
        assert_eq!(env.data, None);
        assert_eq!(env.into_result(), Err("Forbidden".to_string()));
    }
}
