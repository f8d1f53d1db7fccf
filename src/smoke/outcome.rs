use serde_json::Value;
use std::fmt;

/// How a smoke test run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeOutcome {
    /// We never obtained a token, so the authenticated endpoints were skipped.
    LoginFailed,
    /// We logged in, but the children endpoint did not report success.
    Failed,
    /// The children endpoint reported success with this many children.
    Passed { children: usize },
}

impl SmokeOutcome {
    /// Judges the run from the children endpoint's body, if we got one.
    ///
    /// The body's `success` field must be truthy. A missing `children`
    /// list (or one that isn't a list at all) counts as zero children.
    pub fn from_children(body: Option<&Value>) -> Self {
        let Some(body) = body else {
            return Self::Failed;
        };
        if !body.get("success").is_some_and(is_truthy) {
            return Self::Failed;
        }

        let children = body
            .get("children")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        Self::Passed { children }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

impl fmt::Display for SmokeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoginFailed => write!(f, "❌ Cannot test authenticated endpoints without token"),
            Self::Failed => write!(f, "❌ Some tests failed"),
            Self::Passed { children } => {
                write!(f, "✅ All tests passed! Found {children} children")
            }
        }
    }
}

/// Loose truthiness: `false`, `null`, zero and empty values are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
