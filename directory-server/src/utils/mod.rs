//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`logger`] - 日志初始化与清理
//! - [`validation`] - 请求体校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
