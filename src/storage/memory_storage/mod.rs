//! 内存存储实现
//!
//! 每个班级文档是 DashMap 中的一个条目，所有修改都在该条目的写锁内完成，
//! 与 MongoDB 的单文档原子性保持一致。主要用于测试和本地开发。
//!
//! 班级名称另有 `names` 索引充当唯一约束。加锁顺序固定为先 `names` 后 `classes`。

mod classes;
mod lectures;

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::NaiveDate;
use dashmap::DashMap;
use tracing::debug;

use crate::entity::classes::ClassDocument;
use crate::errors::Result;
use crate::models::{
    classes::{
        entities::{Class, ClassSummary, ClassUpdate, NewClass},
        responses::CreatedClass,
    },
    lectures::entities::LectureEntry,
};
use crate::storage::Storage;

/// 存储的班级文档，seq 记录插入顺序
#[derive(Debug)]
struct StoredClass {
    seq: u64,
    doc: ClassDocument,
}

/// 内存存储实现
#[derive(Debug, Default)]
pub struct MemoryStorage {
    classes: DashMap<ObjectId, StoredClass>,
    // 班级名称 -> 班级 ID
    names: DashMap<String, ObjectId>,
    next_seq: AtomicU64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    // 班级模块
    async fn find_class_by_name(&self, class_name: &str) -> Result<Option<Class>> {
        self.find_class_by_name_impl(class_name)
    }

    async fn create_class(&self, class: NewClass) -> Result<CreatedClass> {
        self.create_class_impl(class)
    }

    async fn update_class(&self, class_id: ObjectId, update: ClassUpdate) -> Result<bool> {
        self.update_class_impl(class_id, update)
    }

    async fn list_classes(&self) -> Result<Vec<ClassSummary>> {
        self.list_classes_impl()
    }

    async fn get_class_by_id(&self, class_id: ObjectId) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id)
    }

    // 课程模块
    async fn add_lecture(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        entry: LectureEntry,
    ) -> Result<bool> {
        self.add_lecture_impl(class_id, date, entry)
    }

    async fn update_lecture(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
        entry: LectureEntry,
    ) -> Result<bool> {
        self.update_lecture_impl(class_id, date, subject_code, entry)
    }

    async fn get_lectures_by_date(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Vec<LectureEntry>> {
        self.get_lectures_by_date_impl(class_id, date)
    }

    async fn delete_lectures_by_date(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Option<Vec<LectureEntry>>> {
        self.delete_lectures_by_date_impl(class_id, date)
    }

    async fn delete_lectures_by_subject_code(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
    ) -> Result<Vec<LectureEntry>> {
        self.delete_lectures_by_subject_code_impl(class_id, date, subject_code)
    }

    async fn shutdown(&self) {
        debug!("Dropping {} in-memory class documents", self.classes.len());
        self.classes.clear();
        self.names.clear();
    }
}
