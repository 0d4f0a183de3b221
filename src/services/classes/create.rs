use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use super::unique::check_class_name_unique;
use crate::models::classes::requests::ClassRequest;
use crate::services::{operation_failed, validation_failed};
use crate::utils::validate::validate_new_class;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: ClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 名称唯一性预检，与字段校验的错误合并返回
    let name_taken = match class_data.class_name.as_deref() {
        Some(name) => check_class_name_unique(&storage, name, None).await,
        None => None,
    };

    let new_class = match (validate_new_class(&class_data), name_taken) {
        (Ok(new_class), None) => new_class,
        (Ok(_), Some(taken)) => return Ok(validation_failed(vec![taken])),
        (Err(mut errors), taken) => {
            errors.extend(taken);
            return Ok(validation_failed(errors));
        }
    };

    match storage.create_class(new_class).await {
        Ok(created) => {
            info!(
                "Class {} created with code {}",
                created.id, created.class_code
            );
            Ok(HttpResponse::Ok().json(created))
        }
        Err(e) => {
            error!("Class creation failed: {}", e);
            Ok(operation_failed())
        }
    }
}
