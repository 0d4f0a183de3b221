//! MongoDB 存储实现
//!
//! 班级文档存放在单个集合中，课程作为嵌入数组维护。
//! 所有写操作都只涉及一个文档，依赖 MongoDB 的单文档原子性。

mod classes;
mod lectures;

use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::NaiveDate;
use mongodb::{
    Client, Collection, IndexModel,
    options::{ClientOptions, Credential, IndexOptions, ServerAddress},
};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::{CLASS_COLLECTION_NAME, classes::ClassDocument};
use crate::errors::{Result, ScheduleError};
use crate::models::{
    classes::{
        entities::{Class, ClassSummary, ClassUpdate, NewClass},
        responses::CreatedClass,
    },
    lectures::entities::LectureEntry,
};
use crate::storage::Storage;

/// MongoDB 存储实现
#[derive(Clone)]
pub struct MongoStorage {
    client: Client,
    pub(crate) classes: Collection<ClassDocument>,
}

impl MongoStorage {
    /// 创建新的 MongoDB 存储实例
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let options = Self::build_client_options(config).await?;
        let client = Client::with_options(options)
            .map_err(|e| ScheduleError::database_config(format!("MongoDB 客户端创建失败: {e}")))?;

        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.name));

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ScheduleError::database_connection(format!("无法连接到数据库: {e}")))?;

        let classes = db.collection::<ClassDocument>(CLASS_COLLECTION_NAME);
        Self::ensure_indexes(&classes).await?;

        info!(
            "MongoDB 存储初始化完成，数据库: {} ({})",
            db.name(),
            config.redacted_target()
        );

        Ok(Self { client, classes })
    }

    /// 由配置构建客户端参数：url 优先，否则由 host/port/凭据拼装
    async fn build_client_options(config: &DatabaseConfig) -> Result<ClientOptions> {
        let mut options = if config.url.is_empty() {
            let address = ServerAddress::parse(format!("{}:{}", config.host, config.port))
                .map_err(|e| {
                    ScheduleError::database_config(format!("MongoDB 地址解析失败: {e}"))
                })?;

            let mut options = ClientOptions::default();
            options.hosts = vec![address];
            options.default_database = Some(config.name.clone());

            if config.has_credentials() {
                let mut credential = Credential::default();
                credential.username = Some(config.user.clone());
                credential.password = Some(config.password.clone());
                credential.source = Some(config.auth_source.clone());
                options.credential = Some(credential);
            }
            options
        } else {
            ClientOptions::parse(&config.url)
                .await
                .map_err(|e| ScheduleError::database_config(format!("MongoDB URL 解析失败: {e}")))?
        };

        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(config.pool_size);
        options.connect_timeout = Some(Duration::from_secs(config.timeout));
        options.server_selection_timeout = Some(Duration::from_secs(config.timeout));

        Ok(options)
    }

    /// 班级名称唯一索引
    async fn ensure_indexes(classes: &Collection<ClassDocument>) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "class_name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        if let Err(e) = classes.create_index(index).await {
            // 已有重复数据时索引无法建立，服务仍可运行，唯一性由校验层保证
            warn!("Failed to create unique index on class_name: {}", e);
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MongoStorage {
    // 班级模块
    async fn find_class_by_name(&self, class_name: &str) -> Result<Option<Class>> {
        self.find_class_by_name_impl(class_name).await
    }

    async fn create_class(&self, class: NewClass) -> Result<CreatedClass> {
        self.create_class_impl(class).await
    }

    async fn update_class(&self, class_id: ObjectId, update: ClassUpdate) -> Result<bool> {
        self.update_class_impl(class_id, update).await
    }

    async fn list_classes(&self) -> Result<Vec<ClassSummary>> {
        self.list_classes_impl().await
    }

    async fn get_class_by_id(&self, class_id: ObjectId) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    // 课程模块
    async fn add_lecture(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        entry: LectureEntry,
    ) -> Result<bool> {
        self.add_lecture_impl(class_id, date, entry).await
    }

    async fn update_lecture(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
        entry: LectureEntry,
    ) -> Result<bool> {
        self.update_lecture_impl(class_id, date, subject_code, entry)
            .await
    }

    async fn get_lectures_by_date(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Vec<LectureEntry>> {
        self.get_lectures_by_date_impl(class_id, date).await
    }

    async fn delete_lectures_by_date(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> Result<Option<Vec<LectureEntry>>> {
        self.delete_lectures_by_date_impl(class_id, date).await
    }

    async fn delete_lectures_by_subject_code(
        &self,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: &str,
    ) -> Result<Vec<LectureEntry>> {
        self.delete_lectures_by_subject_code_impl(class_id, date, subject_code)
            .await
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB client shut down");
    }
}
