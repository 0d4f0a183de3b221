use serde::Deserialize;
use serde_json::Value;

// 新增/更新课程请求
//
// teacher_id 与起止时间接受任意 JSON 类型，由校验层决定如何处理，
// 避免因类型不符导致整个请求体解析失败。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LectureRequest {
    pub subject_code: Option<Value>,
    pub teacher_id: Option<Value>,
    pub start_time: Option<Value>,
    pub end_time: Option<Value>,
}

// 按科目删除时的路径参数，科目代码不做校验
#[derive(Debug, Clone, Deserialize)]
pub struct LectureSubjectPath {
    pub subject_code: String,
}
