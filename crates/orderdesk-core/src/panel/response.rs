use super::PanelError;
use serde_json::{Map, Value};

/// Placeholder for fields the panel left out.
pub const MISSING_FIELD: &str = "N/A";

/// A successfully parsed panel reply without an `error` field.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelResponse {
    fields: Map<String, Value>,
}

impl PanelResponse {
    /// Parse a raw response body.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Decode` if the body is not a JSON object and
    /// `PanelError::Remote` if the object carries an `error` field.
    pub fn parse(body: &str) -> Result<Self, PanelError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| PanelError::Decode(e.to_string()))?;

        let Value::Object(fields) = value else {
            return Err(PanelError::Decode(format!(
                "expected a JSON object, got: {}",
                crate::utils::truncate_str(body.trim(), 100)
            )));
        };

        if let Some(error) = fields.get("error") {
            return Err(PanelError::Remote(
                render_scalar(error).unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        Ok(Self { fields })
    }

    /// Text form of a field, `None` when absent or null.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(render_scalar)
    }
}

/// Strings render verbatim, other values as compact JSON.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Reply to a `balance` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// Amount as reported, `0` when absent
    pub amount: String,
    /// Currency code, `USD` when absent
    pub currency: String,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            amount: "0".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl From<&PanelResponse> for Balance {
    fn from(response: &PanelResponse) -> Self {
        let fallback = Self::default();
        Self {
            amount: response.field("balance").unwrap_or(fallback.amount),
            currency: response.field("currency").unwrap_or(fallback.currency),
        }
    }
}

/// Reply to a `status` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatus {
    /// Status string
    pub status: String,
    /// Service name
    pub service: String,
    /// Target link
    pub link: String,
}

impl From<&PanelResponse> for OrderStatus {
    fn from(response: &PanelResponse) -> Self {
        let or_missing = |name: &str| {
            response
                .field(name)
                .unwrap_or_else(|| MISSING_FIELD.to_string())
        };
        Self {
            status: or_missing("status"),
            service: or_missing("service"),
            link: or_missing("link"),
        }
    }
}
