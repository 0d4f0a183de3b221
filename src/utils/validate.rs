use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::FieldError;
use crate::models::classes::entities::{ClassType, ClassUpdate, NewClass};
use crate::models::classes::requests::ClassRequest;
use crate::models::lectures::entities::LectureEntry;
use crate::models::lectures::requests::LectureRequest;

static LECTURE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})([-/])(\d{2})([-/])(\d{2})$").expect("Invalid lecture date regex")
});

pub const CLASS_NAME_MAX_LEN: usize = 255;
pub const CLASS_CODE_LEN: usize = 6;
pub const SUBJECT_CODE_LEN: usize = 6;
pub const CLASS_NUMBER_RANGE: std::ops::RangeInclusive<i64> = 1..=12;

const CLASS_NAME_MSG: &str = "class name is required and can be of 255 characters max";
const CLASS_CODE_MSG: &str = "class code has to be 6 characters";
const CLASS_NUMBER_MSG: &str = "class number can only be in range 1 to 12";
const CLASS_TYPE_MSG: &str = "valid values are only boys or girls";
const SUBJECT_CODE_MSG: &str = "subject code is required and has to be 6 characters";
const START_TIME_MSG: &str = "start time is required";
const END_TIME_MSG: &str = "end time is required";
const DATE_MSG: &str = "invalid date";

fn string_value(value: &str) -> Option<Value> {
    Some(Value::String(value.to_string()))
}

fn check_class_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.chars().count() > CLASS_NAME_MAX_LEN {
        errors.push(FieldError::body("class_name", CLASS_NAME_MSG, string_value(name)));
    }
}

fn check_class_code(code: &str, errors: &mut Vec<FieldError>) {
    if code.chars().count() != CLASS_CODE_LEN {
        errors.push(FieldError::body("class_code", CLASS_CODE_MSG, string_value(code)));
    }
}

// 接受整数或整数字符串（如 "5"）
fn check_class_number(value: &Value, errors: &mut Vec<FieldError>) -> Option<i32> {
    let number = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    };

    match number
        .filter(|n| CLASS_NUMBER_RANGE.contains(n))
        .and_then(|n| i32::try_from(n).ok())
    {
        Some(number) => Some(number),
        None => {
            errors.push(FieldError::body(
                "class_number",
                CLASS_NUMBER_MSG,
                Some(value.clone()),
            ));
            None
        }
    }
}

// 标量转为字符串，数组与对象返回 None
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// 起止时间只要求存在，任意值按字符串保存
fn time_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_class_type(value: &str, errors: &mut Vec<FieldError>) -> Option<ClassType> {
    match value.parse::<ClassType>() {
        Ok(class_type) => Some(class_type),
        Err(_) => {
            errors.push(FieldError::body("type", CLASS_TYPE_MSG, string_value(value)));
            None
        }
    }
}

/// 校验创建班级请求（不包含名称唯一性，唯一性需要查询存储）
pub fn validate_new_class(req: &ClassRequest) -> Result<NewClass, Vec<FieldError>> {
    let mut errors = Vec::new();

    match req.class_name.as_deref() {
        Some(name) => check_class_name(name, &mut errors),
        None => errors.push(FieldError::body("class_name", CLASS_NAME_MSG, None)),
    }

    if let Some(code) = req.class_code.as_deref() {
        check_class_code(code, &mut errors);
    }

    let class_number = match req.class_number.as_ref() {
        Some(number) => check_class_number(number, &mut errors),
        None => {
            errors.push(FieldError::body("class_number", CLASS_NUMBER_MSG, None));
            None
        }
    };

    let class_type = match req.class_type.as_deref() {
        Some(value) => check_class_type(value, &mut errors),
        None => {
            errors.push(FieldError::body("type", CLASS_TYPE_MSG, None));
            None
        }
    };

    match (req.class_name.clone(), class_number, class_type) {
        (Some(class_name), Some(class_number), Some(class_type)) if errors.is_empty() => {
            Ok(NewClass {
                class_name,
                class_code: req.class_code.clone(),
                class_number,
                is_primary: req.is_primary.unwrap_or(true),
                class_type,
            })
        }
        _ => Err(errors),
    }
}

/// 校验更新班级请求：字段均可选，出现时按创建规则校验
pub fn validate_class_update(req: &ClassRequest) -> Result<ClassUpdate, Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Some(name) = req.class_name.as_deref() {
        check_class_name(name, &mut errors);
    }
    if let Some(code) = req.class_code.as_deref() {
        check_class_code(code, &mut errors);
    }
    let class_number = req
        .class_number
        .as_ref()
        .and_then(|number| check_class_number(number, &mut errors));
    let class_type = req
        .class_type
        .as_deref()
        .and_then(|value| check_class_type(value, &mut errors));

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ClassUpdate {
        class_name: req.class_name.clone(),
        class_code: req.class_code.clone(),
        class_number,
        is_primary: req.is_primary,
        class_type,
    })
}

/// 校验课程请求
///
/// teacher_id 不在此校验：非字符串视为未提供，非法的 ID 字符串入库时置空。
pub fn validate_lecture(req: &LectureRequest) -> Result<LectureEntry, Vec<FieldError>> {
    let mut errors = Vec::new();

    let subject_code = match req.subject_code.as_ref() {
        Some(value) => match scalar_text(value) {
            Some(code) => match validate_subject_code(&code) {
                Ok(()) => Some(code),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            None => {
                errors.push(FieldError::body(
                    "subject_code",
                    SUBJECT_CODE_MSG,
                    Some(value.clone()),
                ));
                None
            }
        },
        None => {
            errors.push(FieldError::body("subject_code", SUBJECT_CODE_MSG, None));
            None
        }
    };
    let start_time = req.start_time.as_ref().map(time_text);
    if start_time.is_none() {
        errors.push(FieldError::body("start_time", START_TIME_MSG, None));
    }
    let end_time = req.end_time.as_ref().map(time_text);
    if end_time.is_none() {
        errors.push(FieldError::body("end_time", END_TIME_MSG, None));
    }

    match (subject_code, start_time, end_time) {
        (Some(subject_code), Some(start_time), Some(end_time)) if errors.is_empty() => {
            Ok(LectureEntry {
                subject_code,
                teacher_id: req
                    .teacher_id
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(str::to_string),
                start_time,
                end_time,
            })
        }
        _ => Err(errors),
    }
}

pub fn validate_subject_code(code: &str) -> Result<(), FieldError> {
    if code.chars().count() != SUBJECT_CODE_LEN {
        return Err(FieldError::body(
            "subject_code",
            SUBJECT_CODE_MSG,
            string_value(code),
        ));
    }
    Ok(())
}

/// 解析路由中的课程日期，支持 YYYY-MM-DD 与 YYYY/MM/DD
pub fn parse_lecture_date(value: &str) -> Result<NaiveDate, FieldError> {
    let invalid = || FieldError::params("date", DATE_MSG, value);

    let caps = LECTURE_DATE_RE.captures(value).ok_or_else(invalid)?;
    // 两个分隔符必须一致
    if caps[2] != caps[4] {
        return Err(invalid());
    }

    let year = caps[1].parse::<i32>().map_err(|_| invalid())?;
    let month = caps[3].parse::<u32>().map_err(|_| invalid())?;
    let day = caps[5].parse::<u32>().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
