// Request and response envelopes for the /http endpoint
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inbound tool invocation.
///
/// Only a JSON object decodes. Keys match `tool` and `args` ignoring ASCII
/// case and the last occurrence wins. A missing or `null` `tool` leaves the
/// empty string, which no tool is registered under.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ToolRequest {
    pub tool: String,
    pub args: Option<Value>,
}

impl ToolRequest {
    /// Decode a raw request body. A bare `null` body is an empty request.
    /// Invalid UTF-8 is replaced with U+FFFD before decoding.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let body = String::from_utf8_lossy(body);
        let request: Option<ToolRequest> = serde_json::from_str(&body)?;
        Ok(request.unwrap_or_default())
    }

    pub fn args(&self) -> &Value {
        self.args.as_ref().unwrap_or(&Value::Null)
    }
}

impl<'de> Deserialize<'de> for ToolRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EnvelopeVisitor)
    }
}

struct EnvelopeVisitor;

impl<'de> Visitor<'de> for EnvelopeVisitor {
    type Value = ToolRequest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a tool request object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<ToolRequest, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = ToolRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("tool") {
                // null keeps whatever an earlier key set
                if let Some(tool) = map.next_value::<Option<String>>()? {
                    request.tool = tool;
                }
            } else if key.eq_ignore_ascii_case("args") {
                request.args = Some(map.next_value::<Value>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(request)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolResponse {
    pub result: String,
}
