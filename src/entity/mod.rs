//! MongoDB 文档定义
//!
//! 这些结构体描述 `classes` 集合中的文档形状，与 models 模块中的业务实体分离。
//! Storage 层使用这些文档进行读写，然后转换为 models 中的业务实体。

pub mod classes;
pub mod lectures;

/// 班级集合名称
pub const CLASS_COLLECTION_NAME: &str = "classes";
