//! 课程存储操作
//!
//! 课程分组嵌入在班级文档的 `lectures` 数组中：
//! - 追加到已有分组使用位置操作符 `lectures.$.schedule`
//! - 修改/删除单节课程使用 arrayFilters（`lecture` 按日期，`schedule` 按科目代码）

use bson::{Bson, Document, doc, oid::ObjectId};
use chrono::NaiveDate;
use mongodb::options::ReturnDocument;
use tracing::debug;

use super::MongoStorage;
use crate::entity::classes::LecturesProjection;
use crate::entity::lectures::{LectureBucketDocument, LectureEntryDocument, lecture_date};
use crate::errors::{Result, ScheduleError};
use crate::models::lectures::entities::LectureEntry;

/// 新建分组被并发抢先时，重新尝试追加的次数
const ADD_LECTURE_ATTEMPTS: usize = 2;

/// 只投影出指定日期的分组
fn bucket_projection(day: bson::DateTime) -> Document {
    doc! { "lectures": { "$elemMatch": { "date": day } } }
}

/// 班级中已存在该日期分组
fn bucket_filter(class_id: ObjectId, day: bson::DateTime) -> Document {
    doc! { "_id": class_id, "lectures.date": day }
}

/// 班级中还没有该日期分组
fn missing_bucket_filter(class_id: ObjectId, day: bson::DateTime) -> Document {
    doc! { "_id": class_id, "lectures.date": { "$ne": day } }
}

/// 追加到 `bucket_filter` 匹配到的分组（位置操作符指向该分组）
fn append_entry_update(entry: &Bson) -> Document {
    doc! { "$push": { "lectures.$.schedule": entry.clone() } }
}

/// 新建只含一节课程的分组
fn new_bucket_update(day: bson::DateTime, entry: &Bson) -> Document {
    doc! { "$push": { "lectures": { "date": day, "schedule": [entry.clone()] } } }
}

/// 替换 `lecture_array_filters` 选中的课程
fn replace_entry_update(entry: Bson) -> Document {
    doc! { "$set": { "lectures.$[lecture].schedule.$[schedule]": entry } }
}

/// `lecture` 按日期选分组，`schedule` 按科目代码选课程
fn lecture_array_filters(day: bson::DateTime, subject_code: &str) -> Vec<Document> {
    vec![
        doc! { "lecture.date": day },
        doc! { "schedule.subject_code": subject_code },
    ]
}

/// 移除整个日期分组
fn pull_bucket_update(day: bson::DateTime) -> Document {
    doc! { "$pull": { "lectures": { "date": day } } }
}

/// 该日期分组中含有指定科目的课程
fn subject_filter(class_id: ObjectId, day: bson::DateTime, subject_code: &str) -> Document {
    doc! {
        "_id": class_id,
        "lectures": { "$elemMatch": { "date": day, "schedule.subject_code": subject_code } },
    }
}

/// 从 `lecture` 选中的分组里移除指定科目，配合 `[{"lecture.date": day}]` 使用
fn pull_subject_update(subject_code: &str) -> Document {
    doc! { "$pull": { "lectures.$[lecture].schedule": { "subject_code": subject_code } } }
}

/// 仅当分组仍为空时移除
fn pull_empty_bucket_update(day: bson::DateTime) -> Document {
    doc! { "$pull": { "lectures": { "date": day, "schedule": { "$size": 0 } } } }
}

fn entry_to_bson(entry: LectureEntry) -> Result<Bson> {
    Ok(bson::to_bson(&LectureEntryDocument::from(entry))?)
}

fn first_bucket(projection: Option<LecturesProjection>) -> Option<LectureBucketDocument> {
    projection.and_then(|p| p.lectures.into_iter().next())
}

fn db_error(action: &str) -> impl Fn(mongodb::error::Error) -> ScheduleError + '_ {
    move |e| ScheduleError::database_operation(format!("{action}: {e}"))
}

impl MongoStorage {
    /// 新增课程
    ///
    /// 先尝试追加到该日期的分组；没有分组时，仅在分组仍不存在的条件下插入新分组，
    /// 两个请求同时为同一天建分组时，后到的那个会回到追加分支。
    pub async fn add_lecture_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        entry: LectureEntry,
    ) -> Result<bool> {
        let entry = entry_to_bson(entry)?;
        let day = lecture_date(date);

        for attempt in 1..=ADD_LECTURE_ATTEMPTS {
            let appended = self
                .classes
                .update_one(
                    bucket_filter(class_id, day),
                    append_entry_update(&entry),
                )
                .await
                .map_err(db_error("追加课程失败"))?;
            if appended.matched_count > 0 {
                return Ok(true);
            }

            let created = self
                .classes
                .update_one(
                    missing_bucket_filter(class_id, day),
                    new_bucket_update(day, &entry),
                )
                .await
                .map_err(db_error("新建课程分组失败"))?;
            if created.matched_count > 0 {
                debug!("Created lecture bucket {} for class {}", date, class_id);
                return Ok(true);
            }

            debug!(
                "No bucket matched for class {} on {} (attempt {})",
                class_id, date, attempt
            );
        }

        // 两个条件都不匹配：班级不存在
        Ok(false)
    }

    /// 替换该日期下所有匹配科目代码的课程
    pub async fn update_lecture_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
        entry: LectureEntry,
    ) -> Result<bool> {
        let entry = entry_to_bson(entry)?;
        let day = lecture_date(date);

        let result = self
            .classes
            .update_one(doc! { "_id": class_id }, replace_entry_update(entry))
            .array_filters(lecture_array_filters(day, subject_code))
            .await
            .map_err(db_error("更新课程失败"))?;

        Ok(result.modified_count > 0)
    }

    /// 获取某天的课程
    pub async fn get_lectures_by_date_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Vec<LectureEntry>> {
        let day = lecture_date(date);

        let projection = self
            .classes
            .clone_with_type::<LecturesProjection>()
            .find_one(doc! { "_id": class_id })
            .projection(bucket_projection(day))
            .await
            .map_err(db_error("查询课程失败"))?;

        Ok(first_bucket(projection)
            .map(LectureBucketDocument::into_schedule)
            .unwrap_or_default())
    }

    /// 删除某天的整个分组，同一次操作中取回删除前的课程
    pub async fn delete_lectures_by_date_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Option<Vec<LectureEntry>>> {
        let day = lecture_date(date);

        let before = self
            .classes
            .clone_with_type::<LecturesProjection>()
            .find_one_and_update(bucket_filter(class_id, day), pull_bucket_update(day))
            .projection(bucket_projection(day))
            .return_document(ReturnDocument::Before)
            .await
            .map_err(db_error("删除课程分组失败"))?;

        Ok(first_bucket(before).map(LectureBucketDocument::into_schedule))
    }

    /// 删除某天匹配科目代码的课程，分组被清空时一并移除
    pub async fn delete_lectures_by_subject_code_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
    ) -> Result<Vec<LectureEntry>> {
        let day = lecture_date(date);

        let before = self
            .classes
            .clone_with_type::<LecturesProjection>()
            .find_one_and_update(
                subject_filter(class_id, day, subject_code),
                pull_subject_update(subject_code),
            )
            .array_filters(vec![doc! { "lecture.date": day }])
            .projection(bucket_projection(day))
            .return_document(ReturnDocument::Before)
            .await
            .map_err(db_error("删除课程失败"))?;

        let Some(bucket) = first_bucket(before) else {
            debug!(
                "No lecture {} on {} for class {}",
                subject_code, date, class_id
            );
            return Ok(Vec::new());
        };

        let (removed, kept): (Vec<_>, Vec<_>) = bucket
            .schedule
            .into_iter()
            .partition(|l| l.subject_code == subject_code);

        if kept.is_empty() {
            // 仍为空才移除，期间有新课程加入则保留分组
            self.classes
                .update_one(doc! { "_id": class_id }, pull_empty_bucket_update(day))
                .await
                .map_err(db_error("移除空课程分组失败"))?;
        }

        Ok(removed
            .into_iter()
            .map(LectureEntryDocument::into_entry)
            .collect())
    }
}
