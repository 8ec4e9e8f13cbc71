use serde::Deserialize;
use thiserror::Error;

/// One observation extracted from an STH response: the numeric reading and
/// the raw reception timestamp exactly as the API returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSample {
    pub value: f64,
    pub recv_time: String,
}

/// Top-level STH-Comet historical query response
#[derive(Debug, Clone, Deserialize)]
pub struct SthResponse {
    #[serde(rename = "contextResponses")]
    pub context_responses: Vec<ContextResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextResponse {
    #[serde(rename = "contextElement")]
    pub context_element: ContextElement,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextElement {
    pub attributes: Vec<SthAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SthAttribute {
    pub values: Vec<SthValue>,
}

/// A single value entry. STH serializes `attrValue` as a string for some
/// device firmwares and as a bare number for others, so it is kept as a raw
/// JSON value until conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct SthValue {
    #[serde(rename = "attrValue")]
    pub attr_value: serde_json::Value,
    #[serde(rename = "recvTime")]
    pub recv_time: String,
}

impl SthValue {
    /// Coerce `attrValue` to a float, accepting both `"23.5"` and `23.5`
    fn parse_value(&self) -> Option<f64> {
        match &self.attr_value {
            serde_json::Value::String(s) => s.trim().parse().ok(),
            serde_json::Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl SthResponse {
    /// Flatten the nested response into `(value, recvTime)` samples in the
    /// order the API returned them.
    ///
    /// The nesting (`contextResponses[0].contextElement.attributes[0].values`)
    /// must be present; a response without it is a `Shape` error, as is any
    /// `attrValue` that cannot be read as a number.
    pub fn into_samples(self) -> Result<Vec<SignalSample>, FetchError> {
        let values = self
            .context_responses
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Shape("empty contextResponses".to_string()))?
            .context_element
            .attributes
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Shape("empty attributes".to_string()))?
            .values;

        values
            .into_iter()
            .map(|v| {
                let value = v.parse_value().ok_or_else(|| {
                    FetchError::Shape(format!("non-numeric attrValue: {}", v.attr_value))
                })?;
                Ok(SignalSample {
                    value,
                    recv_time: v.recv_time,
                })
            })
            .collect()
    }
}

/// Errors from one fetch of one signal. All variants are non-fatal for the
/// process: the caller logs them and treats the signal as having no data for
/// that tick.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Non-2xx status from the STH endpoint
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    /// Transport-level failure (connect, timeout, body read)
    #[error("Request failed: {0}")]
    Transport(String),
    /// Response parsed as JSON but the expected nesting or value types
    /// were missing
    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: serde_json::Value) -> SthResponse {
        serde_json::from_value(body).expect("valid STH shape")
    }

    #[test]
    fn test_samples_from_string_and_numeric_values() {
        let resp = response(serde_json::json!({
            "contextResponses": [{
                "contextElement": {
                    "attributes": [{
                        "values": [
                            {"attrValue": "21.5", "recvTime": "2024-03-10T12:00:00.000Z"},
                            {"attrValue": 22.0, "recvTime": "2024-03-10T12:00:10.000Z"}
                        ]
                    }]
                }
            }]
        }));

        let samples = resp.into_samples().expect("both values parse");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].value, 21.5);
        assert_eq!(samples[0].recv_time, "2024-03-10T12:00:00.000Z");
        assert_eq!(samples[1].value, 22.0);
    }

    #[test]
    fn test_empty_context_responses_is_shape_error() {
        let resp = response(serde_json::json!({ "contextResponses": [] }));
        let err = resp.into_samples().unwrap_err();
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn test_non_numeric_attr_value_is_shape_error() {
        let resp = response(serde_json::json!({
            "contextResponses": [{
                "contextElement": {
                    "attributes": [{
                        "values": [
                            {"attrValue": "not-a-number", "recvTime": "2024-03-10T12:00:00Z"}
                        ]
                    }]
                }
            }]
        }));
        let err = resp.into_samples().unwrap_err();
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn test_missing_nested_keys_do_not_deserialize() {
        let body = serde_json::json!({
            "contextResponses": [{ "contextElement": {} }]
        });
        assert!(serde_json::from_value::<SthResponse>(body).is_err());
    }
}
