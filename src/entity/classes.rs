//! 班级文档

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::lectures::LectureBucketDocument;
use crate::models::classes::entities::{Class, ClassSummary, ClassType, NewClass};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub class_name: String,
    pub class_code: String,
    pub class_number: i32,
    #[serde(default = "default_is_primary")]
    pub is_primary: bool,
    #[serde(rename = "type")]
    pub class_type: ClassType,
    #[serde(default)]
    pub lectures: Vec<LectureBucketDocument>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

fn default_is_primary() -> bool {
    true
}

impl ClassDocument {
    /// 由校验后的数据构建新文档，class_code 必须已确定
    pub fn new(class: NewClass, class_code: String) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            class_name: class.class_name,
            class_code,
            class_number: class.class_number,
            is_primary: class.is_primary,
            class_type: class.class_type,
            lectures: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // 从文档转换为业务模型
    pub fn into_class(self) -> Class {
        Class {
            id: self.id.to_hex(),
            class_name: self.class_name,
            class_code: self.class_code,
            class_number: self.class_number,
            is_primary: self.is_primary,
            class_type: self.class_type,
            lectures: self
                .lectures
                .into_iter()
                .map(|bucket| bucket.into_bucket())
                .collect(),
            created_at: self.created_at.to_chrono(),
            updated_at: self.updated_at.to_chrono(),
        }
    }

    pub fn to_summary(&self) -> ClassSummary {
        ClassSummary {
            id: self.id.to_hex(),
            class_name: self.class_name.clone(),
            class_code: self.class_code.clone(),
            is_primary: self.is_primary,
            class_type: self.class_type,
        }
    }
}

/// 列表查询的投影文档
#[derive(Debug, Clone, Deserialize)]
pub struct ClassSummaryDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub class_name: String,
    pub class_code: String,
    #[serde(default = "default_is_primary")]
    pub is_primary: bool,
    #[serde(rename = "type")]
    pub class_type: ClassType,
}

impl ClassSummaryDocument {
    pub fn into_summary(self) -> ClassSummary {
        ClassSummary {
            id: self.id.to_hex(),
            class_name: self.class_name,
            class_code: self.class_code,
            is_primary: self.is_primary,
            class_type: self.class_type,
        }
    }
}

/// `$elemMatch` 投影后只剩下匹配日期的课程分组
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LecturesProjection {
    #[serde(default)]
    pub lectures: Vec<LectureBucketDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_class() -> NewClass {
        NewClass {
            class_name: "Grade 7 Blue".to_string(),
            class_code: None,
            class_number: 7,
            is_primary: false,
            class_type: ClassType::Girls,
        }
    }

    #[test]
    fn test_new_document_has_matching_timestamps() {
        let doc = ClassDocument::new(new_class(), "AB12cd".to_string());
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(doc.lectures.is_empty());
        assert_eq!(doc.class_code, "AB12cd");
    }

    #[test]
    fn test_into_class_uses_hex_id() {
        let doc = ClassDocument::new(new_class(), "AB12cd".to_string());
        let id = doc.id;
        let class = doc.into_class();
        assert_eq!(class.id, id.to_hex());
        assert_eq!(class.class_type, ClassType::Girls);
        assert!(!class.is_primary);
    }

    #[test]
    fn test_bson_round_trip_keeps_type_field_name() {
        let doc = ClassDocument::new(new_class(), "AB12cd".to_string());
        let raw = bson::to_document(&doc).unwrap();
        assert_eq!(raw.get_str("type").unwrap(), "girls");
        assert!(raw.get_object_id("_id").is_ok());

        let back: ClassDocument = bson::from_document(raw).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_missing_is_primary_defaults_to_true() {
        let raw = bson::doc! {
            "_id": ObjectId::new(),
            "class_name": "Grade 1",
            "class_code": "QWERTY",
            "class_number": 1,
            "type": "boys",
            "created_at": bson::DateTime::now(),
            "updated_at": bson::DateTime::now(),
        };
        let doc: ClassDocument = bson::from_document(raw).unwrap();
        assert!(doc.is_primary);
        assert!(doc.lectures.is_empty());
    }
}
