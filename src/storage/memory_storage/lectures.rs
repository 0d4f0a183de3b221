//! 课程存储操作
//!
//! 每个操作只持有对应班级条目的写锁，语义与 MongoDB 版本的
//! 位置操作符 / arrayFilters 一致。

use bson::oid::ObjectId;
use chrono::NaiveDate;
use tracing::debug;

use super::MemoryStorage;
use crate::entity::lectures::{LectureBucketDocument, LectureEntryDocument, lecture_date};
use crate::errors::Result;
use crate::models::lectures::entities::LectureEntry;

impl MemoryStorage {
    pub(super) fn add_lecture_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        entry: LectureEntry,
    ) -> Result<bool> {
        let Some(mut stored) = self.classes.get_mut(&class_id) else {
            return Ok(false);
        };
        let entry = LectureEntryDocument::from(entry);
        let day = lecture_date(date);

        let lectures = &mut stored.doc.lectures;
        let position = lectures.iter().position(|b| b.date == day);
        match position {
            Some(idx) => lectures[idx].schedule.push(entry),
            None => {
                debug!("Creating lecture bucket {} for class {}", date, class_id);
                lectures.push(LectureBucketDocument::new(date, entry));
            }
        }

        Ok(true)
    }

    pub(super) fn update_lecture_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
        entry: LectureEntry,
    ) -> Result<bool> {
        let Some(mut stored) = self.classes.get_mut(&class_id) else {
            return Ok(false);
        };
        let replacement = LectureEntryDocument::from(entry);
        let day = lecture_date(date);
        let mut modified = false;

        for bucket in stored.doc.lectures.iter_mut().filter(|b| b.date == day) {
            for lecture in bucket
                .schedule
                .iter_mut()
                .filter(|l| l.subject_code == subject_code)
            {
                if *lecture != replacement {
                    *lecture = replacement.clone();
                    modified = true;
                }
            }
        }

        Ok(modified)
    }

    pub(super) fn get_lectures_by_date_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Vec<LectureEntry>> {
        let day = lecture_date(date);
        let schedule = self.classes.get(&class_id).and_then(|stored| {
            stored
                .doc
                .lectures
                .iter()
                .find(|b| b.date == day)
                .cloned()
        });

        Ok(schedule
            .map(LectureBucketDocument::into_schedule)
            .unwrap_or_default())
    }

    pub(super) fn delete_lectures_by_date_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Option<Vec<LectureEntry>>> {
        let Some(mut stored) = self.classes.get_mut(&class_id) else {
            return Ok(None);
        };
        let day = lecture_date(date);

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut stored.doc.lectures)
            .into_iter()
            .partition(|b| b.date == day);
        stored.doc.lectures = kept;

        Ok(removed
            .into_iter()
            .next()
            .map(LectureBucketDocument::into_schedule))
    }

    pub(super) fn delete_lectures_by_subject_code_impl(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
    ) -> Result<Vec<LectureEntry>> {
        let Some(mut stored) = self.classes.get_mut(&class_id) else {
            return Ok(Vec::new());
        };
        let day = lecture_date(date);
        let mut removed = Vec::new();

        for bucket in stored.doc.lectures.iter_mut().filter(|b| b.date == day) {
            let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut bucket.schedule)
                .into_iter()
                .partition(|l| l.subject_code == subject_code);
            bucket.schedule = kept;
            removed.extend(gone);
        }

        // 分组被清空时整体移除
        if !removed.is_empty() {
            stored
                .doc
                .lectures
                .retain(|b| b.date != day || !b.schedule.is_empty());
        }

        Ok(removed
            .into_iter()
            .map(LectureEntryDocument::into_entry)
            .collect())
    }
}
