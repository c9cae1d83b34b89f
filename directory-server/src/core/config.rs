use std::path::PathBuf;

use crate::utils::error::DEFAULT_SUPPORT_CONTACT;

/// Where employee records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// redb file under the work directory
    File,
    /// redb in-memory backend, lost on exit
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// 服务器配置 - 目录服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志格式 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
/// | STORAGE_BACKEND | file | file 或 memory |
/// | DATABASE_PATH | {WORK_DIR}/database/directory.redb | 数据库文件 |
/// | SEED_FILE | (未设置) | 初始员工数据 |
/// | SUPPORT_CONTACT | Please contact the directory operations team. | 500 响应附带的联系方式 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/directory HTTP_PORT=9090 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 默认日志级别 (RUST_LOG 优先)
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
    /// 日志文件目录，未设置时只输出到控制台
    pub log_dir: Option<String>,
    pub storage_backend: StorageBackend,
    /// redb 数据库文件路径
    pub database_path: PathBuf,
    /// 空库启动时导入的员工 JSON 文件
    pub seed_file: Option<PathBuf>,
    /// 内部错误响应末尾的联系方式
    pub support_contact: String,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into());
        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_database_path(&work_dir));

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            storage_backend: std::env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|v| StorageBackend::parse(&v))
                .unwrap_or(StorageBackend::File),
            database_path,
            seed_file: std::env::var("SEED_FILE")
                .ok()
                .filter(|f| !f.trim().is_empty())
                .map(PathBuf::from),
            support_contact: std::env::var("SUPPORT_CONTACT")
                .unwrap_or_else(|_| DEFAULT_SUPPORT_CONTACT.into()),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            work_dir,
        }
    }

    /// 内存存储配置，常用于测试场景
    pub fn in_memory() -> Self {
        let mut config = Self::from_env();
        config.storage_backend = StorageBackend::Memory;
        config.seed_file = None;
        config.log_dir = None;
        config
    }

    fn default_database_path(work_dir: &str) -> PathBuf {
        PathBuf::from(work_dir)
            .join("database")
            .join("directory.redb")
    }

    /// 确保数据库文件所在目录存在
    pub fn ensure_database_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.database_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
