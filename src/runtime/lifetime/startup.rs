use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 连接存储后端并创建索引，失败时终止进程
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    debug!(
        "Connecting storage backend at {}",
        config.database.redacted_target()
    );

    let storage = match crate::storage::create_storage(&config.database).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("{}", e.format_simple());
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };
    warn!("Storage backend initialized");

    StartupContext { storage }
}
