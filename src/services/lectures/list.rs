use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use tracing::error;

use super::LectureService;
use crate::services::operation_failed;

pub async fn list_lectures(
    service: &LectureService,
    request: &HttpRequest,
    class_id: ObjectId,
    date: NaiveDate,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_lectures_by_date(class_id, date).await {
        Ok(lectures) => Ok(HttpResponse::Ok().json(lectures)),
        Err(e) => {
            error!(
                "Failed to get lectures for class {} on {}: {}",
                class_id, date, e
            );
            Ok(operation_failed())
        }
    }
}
