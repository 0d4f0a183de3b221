use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use bson::oid::ObjectId;
use tracing::{debug, error};

use super::ClassService;
use crate::services::operation_failed;

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: ObjectId,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(class)),
        Ok(None) => {
            debug!("Class {} not found", class_id);
            Ok(operation_failed())
        }
        Err(e) => {
            error!("Failed to get class {}: {}", class_id, e);
            Ok(operation_failed())
        }
    }
}
