pub mod classes;
pub mod common;
pub mod lectures;

pub use common::response::{FieldError, FieldLocation, ValidationErrorResponse};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
