//! 全局错误类型定义

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    // 数据库加载相关错误
    /// 两个参考数据库中任意一个不可用（网络/文件/非数组载荷），引擎不可初始化
    #[error("参考数据库不可用：{0}")]
    DatabasesUnavailable(String),
    #[error("数据集快照失败：{0}")]
    SnapshotError(String),

    // 分析相关错误
    #[error("分析器未初始化")]
    AnalyzerNotInitialized,
    #[error("无效输入：{0}")]
    InvalidInput(String),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
}

impl AnalyzerError {
    /// 是否为数据库不可用（与"无匹配"严格区分）
    pub fn is_databases_unavailable(&self) -> bool {
        matches!(self, AnalyzerError::DatabasesUnavailable(_))
    }
}

// 全局Result类型
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
