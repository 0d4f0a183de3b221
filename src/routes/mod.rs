pub mod classes;

pub mod lectures;

pub use classes::configure_classes_routes;

use actix_web::{HttpRequest, HttpResponse};
use tracing::debug;

/// 未匹配任何路由的请求统一返回 400
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    debug!("No route for {} {}", req.method(), req.path());
    HttpResponse::BadRequest().finish()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::web;

    use crate::storage::{Storage, memory_storage::MemoryStorage};

    pub(crate) fn memory_storage() -> web::Data<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        web::Data::new(storage)
    }

    /// 以内存存储构建完整的测试应用
    macro_rules! test_app {
        ($storage:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data($storage.clone())
                    .app_data(
                        actix_web::web::JsonConfig::default()
                            .error_handler(crate::utils::json_error_handler),
                    )
                    .configure(crate::routes::configure_classes_routes)
                    .default_service(actix_web::web::to(crate::routes::fallback)),
            )
            .await
        };
    }

    pub(crate) use test_app;
}
