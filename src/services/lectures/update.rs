use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use tracing::{debug, error};

use super::LectureService;
use crate::models::lectures::requests::LectureRequest;
use crate::services::{operation_failed, validation_failed};
use crate::utils::validate::validate_lecture;

pub async fn update_lecture(
    service: &LectureService,
    request: &HttpRequest,
    class_id: ObjectId,
    date: NaiveDate,
    lecture_data: LectureRequest,
) -> ActixResult<HttpResponse> {
    let entry = match validate_lecture(&lecture_data) {
        Ok(entry) => entry,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let storage = service.get_storage(request);
    // 以请求体中的科目代码定位要替换的课程
    let subject_code = entry.subject_code.clone();

    match storage
        .update_lecture(class_id, date, &subject_code, entry)
        .await
    {
        Ok(modified) => {
            if !modified {
                debug!(
                    "No lecture {} on {} for class {}, nothing replaced",
                    subject_code, date, class_id
                );
            }
            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => {
            error!(
                "Failed to update lecture {} for class {} on {}: {}",
                subject_code, class_id, date, e
            );
            Ok(operation_failed())
        }
    }
}
