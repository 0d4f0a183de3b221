//! 路由参数提取器
//!
//! 在进入服务层之前完成路径参数的解析，非法参数直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::errors::ScheduleError;
use crate::models::{FieldError, ValidationErrorResponse};
use crate::utils::validate::parse_lecture_date;

fn path_param<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.match_info().get(name).unwrap_or_default()
}

fn validation_error(error: FieldError) -> actix_web::Error {
    let cause = format!("invalid path parameter {}: {}", error.param, error.msg);
    debug!("{}", cause);
    InternalError::from_response(
        cause,
        HttpResponse::BadRequest().json(ValidationErrorResponse::single(error)),
    )
    .into()
}

/// 班级 ID（`{class_id}`），必须是合法的 ObjectId
#[derive(Debug, Clone, Copy)]
pub struct SafeClassId(pub ObjectId);

impl FromRequest for SafeClassId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = path_param(req, "class_id");
        ready(match ObjectId::parse_str(raw) {
            Ok(id) => Ok(SafeClassId(id)),
            Err(e) => {
                let e = ScheduleError::from(e);
                debug!("Rejected class id {:?}: [{}] {}", raw, e.code(), e);
                // 非校验类错误，不返回响应体
                Err(InternalError::from_response(
                    format!("invalid class id: {raw}"),
                    HttpResponse::BadRequest().finish(),
                )
                .into())
            }
        })
    }
}

/// 课程日期（`{date}`）
#[derive(Debug, Clone, Copy)]
pub struct SafeLectureDate(pub NaiveDate);

impl FromRequest for SafeLectureDate {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // 路径段中的 `/` 以 %2F 形式出现
        let raw = path_param(req, "date")
            .replace("%2F", "/")
            .replace("%2f", "/");
        ready(
            parse_lecture_date(&raw)
                .map(SafeLectureDate)
                .map_err(validation_error),
        )
    }
}
