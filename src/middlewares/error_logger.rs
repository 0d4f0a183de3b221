/*!
 * 请求错误日志中间件
 *
 * 记录处理失败的请求：内部错误、提取器拒绝的参数以及所有 4xx/5xx 响应。
 * 本服务对外统一返回 400，真实原因只出现在日志中。
 *
 * ```rust,ignore
 * App::new()
 *     .wrap(ErrorLogger)
 *     .configure(routes::configure_classes_routes)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, time::Instant};
use tracing::{debug, error, warn};

#[derive(Clone)]
pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let method = req.method().clone();
        let path = req.path().to_string();
        let started = Instant::now();

        Box::pin(async move {
            let res = match srv.call(req).await {
                Ok(res) => res,
                Err(err) => {
                    error!("{} {} failed: {}", method, path, err);
                    return Err(err);
                }
            };

            let status = res.status();
            let elapsed = started.elapsed().as_millis();
            if let Some(err) = res.response().error() {
                // 提取器和 JSON 解析失败会携带具体原因
                warn!(
                    "{} {} -> {} in {} ms: {}",
                    method,
                    path,
                    status.as_u16(),
                    elapsed,
                    err
                );
            } else if status.is_server_error() {
                error!("{} {} -> {} in {} ms", method, path, status.as_u16(), elapsed);
            } else if status.is_client_error() {
                debug!("{} {} -> {} in {} ms", method, path, status.as_u16(), elapsed);
            }

            Ok(res)
        })
    }
}
