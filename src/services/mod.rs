pub mod classes;
pub mod lectures;

pub use classes::ClassService;
pub use lectures::LectureService;

use actix_web::HttpResponse;

use crate::models::{FieldError, ValidationErrorResponse};

/// 字段校验失败：400 + 错误列表
pub(crate) fn validation_failed(errors: Vec<FieldError>) -> HttpResponse {
    HttpResponse::BadRequest().json(ValidationErrorResponse::new(errors))
}

/// 其他失败（不存在、存储错误）：400 且无响应体
pub(crate) fn operation_failed() -> HttpResponse {
    HttpResponse::BadRequest().finish()
}
