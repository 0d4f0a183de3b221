//! Class Schedule - 班级与课程安排后端服务
//!
//! 基于 Actix Web 构建，班级文档内嵌按日期分组的课程安排。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: MongoDB 文档结构
//! - `errors`: 统一错误处理
//! - `middlewares`: 请求错误日志中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 请求处理与校验
//! - `storage`: 数据存储层（MongoDB / 内存）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
