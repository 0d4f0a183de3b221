use std::sync::Arc;

use bson::oid::ObjectId;
use serde_json::Value;
use tracing::warn;

use crate::models::FieldError;
use crate::storage::Storage;

/// 班级名称唯一性预检
///
/// 在写入之前由请求处理层调用。查询失败按名称未占用处理，
/// 最终由存储层的唯一约束兜底。`current` 为正在更新的班级，不与自身冲突。
pub async fn check_class_name_unique(
    storage: &Arc<dyn Storage>,
    class_name: &str,
    current: Option<ObjectId>,
) -> Option<FieldError> {
    match storage.find_class_by_name(class_name).await {
        Ok(Some(existing)) if current.is_none_or(|id| id.to_hex() != existing.id) => {
            Some(FieldError::body(
                "class_name",
                "class with given name already exists",
                Some(Value::String(class_name.to_string())),
            ))
        }
        Ok(_) => None,
        Err(e) => {
            warn!(
                "Class name lookup failed, treating {:?} as unused: {}",
                class_name, e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::entities::{ClassType, NewClass};
    use crate::storage::memory_storage::MemoryStorage;

    async fn storage_with(name: &str) -> (Arc<dyn Storage>, ObjectId) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let created = storage
            .create_class(NewClass {
                class_name: name.to_string(),
                class_code: None,
                class_number: 2,
                is_primary: true,
                class_type: ClassType::Boys,
            })
            .await
            .unwrap();
        (storage, ObjectId::parse_str(&created.id).unwrap())
    }

    #[tokio::test]
    async fn test_existing_name_is_reported() {
        let (storage, _) = storage_with("Grade 2 A").await;
        let error = check_class_name_unique(&storage, "Grade 2 A", None)
            .await
            .unwrap();
        assert_eq!(error.param, "class_name");
        assert_eq!(error.msg, "class with given name already exists");
    }

    #[tokio::test]
    async fn test_unused_name_passes() {
        let (storage, _) = storage_with("Grade 2 A").await;
        assert!(
            check_class_name_unique(&storage, "Grade 2 B", None)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_own_name_passes_on_update() {
        let (storage, id) = storage_with("Grade 2 A").await;
        assert!(
            check_class_name_unique(&storage, "Grade 2 A", Some(id))
                .await
                .is_none()
        );
        assert!(
            check_class_name_unique(&storage, "Grade 2 A", Some(ObjectId::new()))
                .await
                .is_some()
        );
    }
}
