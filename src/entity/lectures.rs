//! 课程子文档
//!
//! 课程以 `{date, schedule: [...]}` 分组嵌入在班级文档的 `lectures` 数组中，
//! 每个班级每个日期最多一个分组。

use bson::oid::ObjectId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::lectures::entities::{LectureBucket, LectureEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureBucketDocument {
    pub date: bson::DateTime,
    #[serde(default)]
    pub schedule: Vec<LectureEntryDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureEntryDocument {
    pub subject_code: String,
    pub teacher_id: Option<ObjectId>,
    pub start_time: String,
    pub end_time: String,
}

/// 日期按天比较，统一存为当天 UTC 零点
pub fn lecture_date(date: NaiveDate) -> bson::DateTime {
    bson::DateTime::from_chrono(date.and_time(NaiveTime::MIN).and_utc())
}

impl LectureBucketDocument {
    pub fn new(date: NaiveDate, first: LectureEntryDocument) -> Self {
        Self {
            date: lecture_date(date),
            schedule: vec![first],
        }
    }

    pub fn into_bucket(self) -> LectureBucket {
        LectureBucket {
            date: self.date.to_chrono().date_naive(),
            schedule: self.into_schedule(),
        }
    }

    pub fn into_schedule(self) -> Vec<LectureEntry> {
        self.schedule
            .into_iter()
            .map(LectureEntryDocument::into_entry)
            .collect()
    }
}

impl LectureEntryDocument {
    pub fn into_entry(self) -> LectureEntry {
        LectureEntry {
            subject_code: self.subject_code,
            teacher_id: self.teacher_id.map(|id| id.to_hex()),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

// 教师 ID 不是合法的 ObjectId 时存为 null，而不是拒绝请求
impl From<LectureEntry> for LectureEntryDocument {
    fn from(entry: LectureEntry) -> Self {
        Self {
            teacher_id: entry
                .teacher_id
                .as_deref()
                .and_then(|id| ObjectId::parse_str(id).ok()),
            subject_code: entry.subject_code,
            start_time: entry.start_time,
            end_time: entry.end_time,
        }
    }
}
