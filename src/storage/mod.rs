use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::NaiveDate;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    classes::{
        entities::{Class, ClassSummary, ClassUpdate, NewClass},
        responses::CreatedClass,
    },
    lectures::entities::LectureEntry,
};
use crate::utils::{generate_random_code, validate::CLASS_CODE_LEN};

pub mod memory_storage;
pub mod mongo_storage;

/// 未提供班级代码时生成 6 位随机代码
pub(crate) fn resolve_class_code(class_code: Option<String>) -> String {
    class_code.unwrap_or_else(|| generate_random_code(CLASS_CODE_LEN))
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级管理方法
    // 通过名称精确查找班级
    async fn find_class_by_name(&self, class_name: &str) -> Result<Option<Class>>;
    // 创建班级，未提供 class_code 时自动生成
    async fn create_class(&self, class: NewClass) -> Result<CreatedClass>;
    // 部分更新班级，返回是否匹配到班级
    async fn update_class(&self, class_id: ObjectId, update: ClassUpdate) -> Result<bool>;
    // 列出全部班级概要，按创建时间倒序
    async fn list_classes(&self) -> Result<Vec<ClassSummary>>;
    // 通过ID获取班级
    async fn get_class_by_id(&self, class_id: ObjectId) -> Result<Option<Class>>;

    /// 课程管理方法
    // 新增课程：存在该日期的分组则追加，否则新建分组。返回班级是否存在
    async fn add_lecture(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        entry: LectureEntry,
    ) -> Result<bool>;
    // 整体替换该日期下匹配科目代码的课程，返回是否有修改
    async fn update_lecture(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
        entry: LectureEntry,
    ) -> Result<bool>;
    // 获取某天的课程，班级或分组不存在时为空
    async fn get_lectures_by_date(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Vec<LectureEntry>>;
    // 删除某天的整个分组并返回其课程，None 表示没有可删除的分组
    async fn delete_lectures_by_date(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Option<Vec<LectureEntry>>>;
    // 删除某天匹配科目代码的课程，返回被删除的课程
    async fn delete_lectures_by_subject_code(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
    ) -> Result<Vec<LectureEntry>>;

    // 释放连接
    async fn shutdown(&self);
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    if config.is_memory() {
        warn!("Using in-memory storage, data will be lost on shutdown");
        return Ok(Arc::new(memory_storage::MemoryStorage::new()));
    }

    let storage = mongo_storage::MongoStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
