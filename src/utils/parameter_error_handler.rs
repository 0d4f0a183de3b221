use actix_web::{HttpRequest, HttpResponse, error::InternalError, error::JsonPayloadError};
use tracing::debug;

use crate::models::{FieldError, ValidationErrorResponse};

/// JSON 请求体解析失败时返回与字段校验一致的 400 响应
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON body for {} {}: {}", req.method(), req.path(), err);
    let message = err.to_string();
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ValidationErrorResponse::single(FieldError::body(
            "body", message, None,
        ))),
    )
    .into()
}
