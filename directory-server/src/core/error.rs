use thiserror::Error;

use crate::db::StoreError;

/// 启动与运行期间的服务器错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to prepare work directory: {0}")]
    WorkDir(#[from] std::io::Error),

    #[error("Failed to open record store: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(std::io::Error),

    #[error("Failed to load seed data: {0}")]
    Seed(anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
