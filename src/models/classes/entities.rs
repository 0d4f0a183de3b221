use serde::{Deserialize, Serialize};

use crate::models::lectures::entities::LectureBucket;

// 班级类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    Boys,
    Girls,
}

impl ClassType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassType::Boys => "boys",
            ClassType::Girls => "girls",
        }
    }
}

impl std::str::FromStr for ClassType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boys" => Ok(ClassType::Boys),
            "girls" => Ok(ClassType::Girls),
            _ => Err(format!("Invalid class type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Class {
    // 班级ID
    pub id: String,
    // 班级名称（全局唯一）
    pub class_name: String,
    // 6 位班级代码
    pub class_code: String,
    // 年级 1-12
    pub class_number: i32,
    pub is_primary: bool,
    #[serde(rename = "type")]
    pub class_type: ClassType,
    // 按日期分组的课程安排
    pub lectures: Vec<LectureBucket>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 列表视图只返回概要字段
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub id: String,
    pub class_name: String,
    pub class_code: String,
    pub is_primary: bool,
    #[serde(rename = "type")]
    pub class_type: ClassType,
}

// 经过校验的新班级数据（用于存储层）
#[derive(Debug, Clone)]
pub struct NewClass {
    pub class_name: String,
    // 未提供时由存储层生成
    pub class_code: Option<String>,
    pub class_number: i32,
    pub is_primary: bool,
    pub class_type: ClassType,
}

// 经过校验的部分更新（用于存储层），None 表示不修改
#[derive(Debug, Clone, Default)]
pub struct ClassUpdate {
    pub class_name: Option<String>,
    pub class_code: Option<String>,
    pub class_number: Option<i32>,
    pub is_primary: Option<bool>,
    pub class_type: Option<ClassType>,
}

impl ClassUpdate {
    pub fn is_empty(&self) -> bool {
        self.class_name.is_none()
            && self.class_code.is_none()
            && self.class_number.is_none()
            && self.is_primary.is_none()
            && self.class_type.is_none()
    }
}
