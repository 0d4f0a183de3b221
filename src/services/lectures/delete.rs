use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use tracing::{error, info};

use super::LectureService;
use crate::models::lectures::entities::LectureEntry;
use crate::services::operation_failed;

pub async fn delete_lectures_by_date(
    service: &LectureService,
    request: &HttpRequest,
    class_id: ObjectId,
    date: NaiveDate,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_lectures_by_date(class_id, date).await {
        Ok(Some(removed)) => {
            info!(
                "Removed {} lectures from class {} on {}",
                removed.len(),
                class_id,
                date
            );
            Ok(HttpResponse::Ok().json(removed))
        }
        // 没有该日期的分组
        Ok(None) => Ok(HttpResponse::Ok().json(Vec::<LectureEntry>::new())),
        Err(e) => {
            error!(
                "Failed to delete lectures for class {} on {}: {}",
                class_id, date, e
            );
            Ok(operation_failed())
        }
    }
}

pub async fn delete_lectures_by_subject_code(
    service: &LectureService,
    request: &HttpRequest,
    class_id: ObjectId,
    date: NaiveDate,
    subject_code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .delete_lectures_by_subject_code(class_id, date, &subject_code)
        .await
    {
        Ok(removed) => {
            info!(
                "Removed {} lectures {} from class {} on {}",
                removed.len(),
                subject_code,
                class_id,
                date
            );
            Ok(HttpResponse::Ok().json(removed))
        }
        Err(e) => {
            error!(
                "Failed to delete lecture {} for class {} on {}: {}",
                subject_code, class_id, date, e
            );
            Ok(operation_failed())
        }
    }
}
