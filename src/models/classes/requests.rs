use serde::Deserialize;
use serde_json::Value;

// 创建/更新班级请求
//
// 所有字段都是可选的，缺失与取值范围由校验层逐字段报告，
// 而不是在反序列化阶段整体失败。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassRequest {
    pub class_name: Option<String>,
    pub class_code: Option<String>,
    // 整数或整数字符串
    pub class_number: Option<Value>,
    pub is_primary: Option<bool>,
    #[serde(rename = "type")]
    pub class_type: Option<String>,
}
