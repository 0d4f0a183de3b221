//! 班级存储操作

use bson::oid::ObjectId;
use dashmap::mapref::entry::Entry;

use super::{MemoryStorage, StoredClass};
use crate::entity::classes::ClassDocument;
use crate::errors::{Result, ScheduleError};
use crate::models::classes::{
    entities::{Class, ClassSummary, ClassUpdate, NewClass},
    responses::CreatedClass,
};
use crate::storage::resolve_class_code;

fn duplicate_name(class_name: &str) -> ScheduleError {
    ScheduleError::database_operation(format!("duplicate key: class_name {class_name:?}"))
}

fn apply_update(doc: &mut ClassDocument, update: ClassUpdate) {
    if let Some(class_name) = update.class_name {
        doc.class_name = class_name;
    }
    if let Some(class_code) = update.class_code {
        doc.class_code = class_code;
    }
    if let Some(class_number) = update.class_number {
        doc.class_number = class_number;
    }
    if let Some(is_primary) = update.is_primary {
        doc.is_primary = is_primary;
    }
    if let Some(class_type) = update.class_type {
        doc.class_type = class_type;
    }
    doc.updated_at = bson::DateTime::now();
}

impl MemoryStorage {
    pub(super) fn find_class_by_name_impl(&self, class_name: &str) -> Result<Option<Class>> {
        let Some(class_id) = self.names.get(class_name).map(|id| *id) else {
            return Ok(None);
        };
        self.get_class_by_id_impl(class_id)
    }

    pub(super) fn create_class_impl(&self, class: NewClass) -> Result<CreatedClass> {
        // 名称条目的锁一直持有到文档写入完成，同名的并发创建只有一个成功
        let name_slot = match self.names.entry(class.class_name.clone()) {
            Entry::Occupied(_) => return Err(duplicate_name(&class.class_name)),
            Entry::Vacant(slot) => slot,
        };

        let class_code = resolve_class_code(class.class_code.clone());
        let doc = ClassDocument::new(class, class_code.clone());
        let id = doc.id;

        self.classes.insert(
            id,
            StoredClass {
                seq: self.next_seq(),
                doc,
            },
        );
        name_slot.insert(id);

        Ok(CreatedClass {
            id: id.to_hex(),
            class_code,
        })
    }

    pub(super) fn update_class_impl(&self, class_id: ObjectId, update: ClassUpdate) -> Result<bool> {
        let Some(new_name) = update.class_name.clone() else {
            let Some(mut stored) = self.classes.get_mut(&class_id) else {
                return Ok(false);
            };
            apply_update(&mut stored.doc, update);
            return Ok(true);
        };

        let old_name = match self.names.entry(new_name.clone()) {
            Entry::Occupied(slot) if *slot.get() != class_id => {
                return Err(duplicate_name(&new_name));
            }
            slot => {
                let Some(mut stored) = self.classes.get_mut(&class_id) else {
                    return Ok(false);
                };
                let old_name = stored.doc.class_name.clone();
                apply_update(&mut stored.doc, update);
                drop(stored);
                slot.insert(class_id);
                old_name
            }
        };

        // 释放旧名称
        if old_name != new_name {
            self.names.remove_if(&old_name, |_, id| *id == class_id);
        }

        Ok(true)
    }

    pub(super) fn list_classes_impl(&self) -> Result<Vec<ClassSummary>> {
        let mut rows: Vec<(u64, ClassSummary)> = self
            .classes
            .iter()
            .map(|e| (e.seq, e.doc.to_summary()))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(rows.into_iter().map(|(_, summary)| summary).collect())
    }

    pub(super) fn get_class_by_id_impl(&self, class_id: ObjectId) -> Result<Option<Class>> {
        Ok(self
            .classes
            .get(&class_id)
            .map(|stored| stored.doc.clone().into_class()))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::classes::entities::{ClassType, ClassUpdate, NewClass};
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use bson::oid::ObjectId;
    use std::sync::Arc;

    fn new_class(name: &str, code: Option<&str>) -> NewClass {
        NewClass {
            class_name: name.to_string(),
            class_code: code.map(str::to_string),
            class_number: 4,
            is_primary: true,
            class_type: ClassType::Girls,
        }
    }

    #[tokio::test]
    async fn test_create_generates_code_when_missing() {
        let storage = MemoryStorage::new();
        let created = storage.create_class(new_class("Grade 4 A", None)).await.unwrap();
        assert_eq!(created.class_code.len(), 6);
        assert!(created.class_code.chars().all(|c| c.is_ascii_alphanumeric()));

        let class = storage
            .get_class_by_id(ObjectId::parse_str(&created.id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(class.class_code, created.class_code);
        assert!(class.lectures.is_empty());
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_code() {
        let storage = MemoryStorage::new();
        let created = storage
            .create_class(new_class("Grade 4 B", Some("XYZ789")))
            .await
            .unwrap();
        assert_eq!(created.class_code, "XYZ789");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let storage = MemoryStorage::new();
        storage.create_class(new_class("Grade 4 A", None)).await.unwrap();
        assert!(storage.create_class(new_class("Grade 4 A", None)).await.is_err());
        assert_eq!(storage.list_classes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let storage = MemoryStorage::new();
        let created = storage.create_class(new_class("Grade 4 A", None)).await.unwrap();

        let found = storage.find_class_by_name("Grade 4 A").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(storage.find_class_by_name("grade 4 a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let storage = MemoryStorage::new();
        for name in ["first", "second", "third"] {
            storage.create_class(new_class(name, None)).await.unwrap();
        }

        let names: Vec<String> = storage
            .list_classes()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.class_name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let storage = MemoryStorage::new();
        let created = storage
            .create_class(new_class("Grade 4 A", Some("AAAAAA")))
            .await
            .unwrap();
        let id = ObjectId::parse_str(&created.id).unwrap();
        let before = storage.get_class_by_id(id).await.unwrap().unwrap();

        let matched = storage
            .update_class(
                id,
                ClassUpdate {
                    class_number: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(matched);

        let after = storage.get_class_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.class_number, 9);
        assert_eq!(after.class_name, before.class_name);
        assert_eq!(after.class_code, "AAAAAA");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_class_is_unmatched() {
        let storage = MemoryStorage::new();
        let matched = storage
            .update_class(ObjectId::new(), ClassUpdate::default())
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_update_rejects_name_of_other_class() {
        let storage = MemoryStorage::new();
        storage.create_class(new_class("taken", None)).await.unwrap();
        let created = storage.create_class(new_class("mine", None)).await.unwrap();
        let id = ObjectId::parse_str(&created.id).unwrap();

        let rename = |name: &str| ClassUpdate {
            class_name: Some(name.to_string()),
            ..Default::default()
        };
        assert!(storage.update_class(id, rename("taken")).await.is_err());
        // 保持原名不算冲突
        assert!(storage.update_class(id, rename("mine")).await.unwrap());
    }

    #[tokio::test]
    async fn test_rename_frees_old_name() {
        let storage = MemoryStorage::new();
        let created = storage.create_class(new_class("old", None)).await.unwrap();
        let id = ObjectId::parse_str(&created.id).unwrap();

        let rename = ClassUpdate {
            class_name: Some("new".to_string()),
            ..Default::default()
        };
        assert!(storage.update_class(id, rename).await.unwrap());

        assert!(storage.find_class_by_name("old").await.unwrap().is_none());
        let found = storage.find_class_by_name("new").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        // 旧名称可以再次使用
        assert!(storage.create_class(new_class("old", None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_rename_of_unknown_class_reserves_nothing() {
        let storage = MemoryStorage::new();
        let rename = ClassUpdate {
            class_name: Some("ghost".to_string()),
            ..Default::default()
        };
        assert!(!storage.update_class(ObjectId::new(), rename).await.unwrap());
        assert!(storage.create_class(new_class("ghost", None)).await.is_ok());
    }

    #[test]
    fn test_concurrent_creates_with_same_name() {
        let storage = Arc::new(MemoryStorage::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let storage = storage.clone();
                std::thread::spawn(move || storage.create_class_impl(new_class("racing", None)))
            })
            .collect();

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(created, 1);
        assert_eq!(storage.classes.len(), 1);
    }
}
