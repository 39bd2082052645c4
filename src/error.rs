use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures that can stop the module from starting.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("No global window available")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Invalid gallery catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("Gallery catalog is empty")]
    EmptyCatalog,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Required form fields that were empty at submission time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Required fields are empty: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<String>,
}
