use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use bson::oid::ObjectId;
use tracing::{debug, error, info};

use super::ClassService;
use super::unique::check_class_name_unique;
use crate::models::classes::{requests::ClassRequest, responses::UpdatedClass};
use crate::services::{operation_failed, validation_failed};
use crate::utils::validate::validate_class_update;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: ObjectId,
    update_data: ClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name_taken = match update_data.class_name.as_deref() {
        Some(name) => check_class_name_unique(&storage, name, Some(class_id)).await,
        None => None,
    };

    let update = match (validate_class_update(&update_data), name_taken) {
        (Ok(update), None) => update,
        (Ok(_), Some(taken)) => return Ok(validation_failed(vec![taken])),
        (Err(mut errors), taken) => {
            errors.extend(taken);
            return Ok(validation_failed(errors));
        }
    };

    match storage.update_class(class_id, update).await {
        Ok(true) => {
            info!("Class {} updated", class_id);
            Ok(HttpResponse::Ok().json(UpdatedClass {
                id: class_id.to_hex(),
            }))
        }
        Ok(false) => {
            debug!("Update skipped, class {} not found", class_id);
            Ok(operation_failed())
        }
        Err(e) => {
            error!("Class update failed for {}: {}", class_id, e);
            Ok(operation_failed())
        }
    }
}
