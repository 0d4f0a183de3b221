use serde::Serialize;

// 创建班级响应
#[derive(Debug, Clone, Serialize)]
pub struct CreatedClass {
    pub id: String,
    pub class_code: String,
}

// 更新班级响应
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedClass {
    pub id: String,
}
