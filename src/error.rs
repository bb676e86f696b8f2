use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("JavaScript error: {0}")]
    JavaScript(String),
    #[error("Browser global unavailable: {0}")]
    MissingGlobal(&'static str),
    #[error("Element #{0} is not a {1}")]
    WrongElement(String, &'static str),
    #[error("Invalid site configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for SiteError {
    fn from(js_val: JsValue) -> Self {
        let message = js_val
            .as_string()
            .unwrap_or_else(|| format!("{:?}", js_val));
        SiteError::JavaScript(message)
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
