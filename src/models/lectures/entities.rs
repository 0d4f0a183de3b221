use serde::{Deserialize, Serialize};

// 单节课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureEntry {
    pub subject_code: String,
    // 非法的教师 ID 在入库时被置空
    pub teacher_id: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

// 某一天的全部课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LectureBucket {
    pub date: chrono::NaiveDate,
    pub schedule: Vec<LectureEntry>,
}
