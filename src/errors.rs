//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_schedule_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ScheduleError {
            $($variant(String),)*
        }

        impl ScheduleError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ScheduleError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ScheduleError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ScheduleError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ScheduleError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ScheduleError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_schedule_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Serialization("E004", "Serialization Error"),
    InvalidIdentifier("E005", "Invalid Identifier"),
}

impl ScheduleError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ScheduleError {}

// 为常见的错误类型实现 From trait
impl From<bson::ser::Error> for ScheduleError {
    fn from(err: bson::ser::Error) -> Self {
        ScheduleError::Serialization(err.to_string())
    }
}

impl From<bson::oid::Error> for ScheduleError {
    fn from(err: bson::oid::Error) -> Self {
        ScheduleError::InvalidIdentifier(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ScheduleError::database_config("test").code(), "E001");
        assert_eq!(ScheduleError::database_operation("test").code(), "E003");
        assert_eq!(ScheduleError::serialization("test").code(), "E004");
        assert_eq!(ScheduleError::invalid_identifier("test").code(), "E005");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ScheduleError::database_connection("test").error_type(),
            "Database Connection Error"
        );
        assert_eq!(
            ScheduleError::serialization("test").error_type(),
            "Serialization Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ScheduleError::database_operation("duplicate key: class_name");
        assert_eq!(err.message(), "duplicate key: class_name");
    }

    #[test]
    fn test_format_simple() {
        let err = ScheduleError::database_connection("ping timed out");
        let formatted = err.format_simple();
        assert!(formatted.contains("Database Connection Error"));
        assert!(formatted.contains("ping timed out"));
    }

    #[test]
    fn test_from_object_id_error() {
        let err: ScheduleError = bson::oid::ObjectId::parse_str("not-an-id")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E005");
    }
}
