use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use tracing::{debug, error, info};

use super::LectureService;
use crate::models::lectures::requests::LectureRequest;
use crate::services::{operation_failed, validation_failed};
use crate::utils::validate::validate_lecture;

pub async fn add_lecture(
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
    let subject_code = entry.subject_code.clone();

    match storage.add_lecture(class_id, date, entry).await {
        Ok(true) => {
            info!(
                "Lecture {} added to class {} on {}",
                subject_code, class_id, date
            );
            Ok(HttpResponse::Ok().finish())
        }
        Ok(false) => {
            debug!("Lecture not added, class {} not found", class_id);
            Ok(operation_failed())
        }
        Err(e) => {
            error!(
                "Failed to add lecture {} to class {} on {}: {}",
                subject_code, class_id, date, e
            );
            Ok(operation_failed())
        }
    }
}
