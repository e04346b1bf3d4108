/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 顶层错误类型，汇总各模块的错误
 */

use thiserror::Error;

use crate::data::DataError;
use crate::nn::NnError;
use crate::vision::VisionError;

/// 训练程序的顶层错误
///
/// 所有错误都是致命的：训练过程不做重试或恢复。
#[derive(Error, Debug)]
pub enum GanError {
    #[error(transparent)]
    Nn(#[from] NnError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error("配置无效：{0}")]
    InvalidConfig(String),
    #[error("配置序列化失败：{0}")]
    Serialization(#[from] serde_json::Error),
    #[error("日志初始化失败：{0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}
