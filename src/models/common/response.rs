use serde::Serialize;

// 校验错误来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Body,
    Params,
}

// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub location: FieldLocation,
    pub param: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    pub fn body(param: &str, msg: impl Into<String>, value: Option<serde_json::Value>) -> Self {
        Self {
            location: FieldLocation::Body,
            param: param.to_string(),
            msg: msg.into(),
            value,
        }
    }

    pub fn params(param: &str, msg: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            location: FieldLocation::Params,
            param: param.to_string(),
            msg: msg.into(),
            value: Some(serde_json::Value::String(value.into())),
        }
    }
}

// 校验失败响应体：{"errors": [...]}
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl ValidationErrorResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}
