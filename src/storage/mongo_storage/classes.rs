//! 班级存储操作

use bson::{Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;

use super::MongoStorage;
use crate::entity::classes::{ClassDocument, ClassSummaryDocument};
use crate::errors::{Result, ScheduleError};
use crate::models::classes::{
    entities::{Class, ClassSummary, ClassUpdate, NewClass},
    responses::CreatedClass,
};
use crate::storage::resolve_class_code;

/// 将部分更新转换为 `$set` 文档，同时刷新 updated_at
fn class_update_document(update: ClassUpdate) -> Document {
    let mut set = doc! { "updated_at": bson::DateTime::now() };

    if let Some(class_name) = update.class_name {
        set.insert("class_name", class_name);
    }
    if let Some(class_code) = update.class_code {
        set.insert("class_code", class_code);
    }
    if let Some(class_number) = update.class_number {
        set.insert("class_number", class_number);
    }
    if let Some(is_primary) = update.is_primary {
        set.insert("is_primary", is_primary);
    }
    if let Some(class_type) = update.class_type {
        set.insert("type", class_type.as_str());
    }

    set
}

impl MongoStorage {
    /// 通过名称查找班级
    pub async fn find_class_by_name_impl(&self, class_name: &str) -> Result<Option<Class>> {
        let result = self
            .classes
            .find_one(doc! { "class_name": class_name })
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(ClassDocument::into_class))
    }

    /// 创建班级
    pub async fn create_class_impl(&self, class: NewClass) -> Result<CreatedClass> {
        let class_code = resolve_class_code(class.class_code.clone());
        let document = ClassDocument::new(class, class_code.clone());

        self.classes
            .insert_one(&document)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(CreatedClass {
            id: document.id.to_hex(),
            class_code,
        })
    }

    /// 更新班级信息，返回是否匹配到班级
    pub async fn update_class_impl(&self, class_id: ObjectId, update: ClassUpdate) -> Result<bool> {
        let result = self
            .classes
            .update_one(
                doc! { "_id": class_id },
                doc! { "$set": class_update_document(update) },
            )
            .await
            .map_err(|e| ScheduleError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(result.matched_count > 0)
    }

    /// 列出全部班级概要，新建的在前
    pub async fn list_classes_impl(&self) -> Result<Vec<ClassSummary>> {
        let cursor = self
            .classes
            .clone_with_type::<ClassSummaryDocument>()
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .projection(doc! { "class_name": 1, "class_code": 1, "is_primary": 1, "type": 1 })
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询班级列表失败: {e}")))?;

        let rows: Vec<ClassSummaryDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("读取班级列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(ClassSummaryDocument::into_summary)
            .collect())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: ObjectId) -> Result<Option<Class>> {
        let result = self
            .classes
            .find_one(doc! { "_id": class_id })
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(ClassDocument::into_class))
    }
}
