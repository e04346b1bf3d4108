/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : data 模块的错误类型：数据集文件的获取、IDX 解析与批采样
 */

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// 本地没有数据文件且不允许下载
    #[error("缺少数据文件 {0}")]
    MissingFile(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// IDX 文件头或像素区不合法
    #[error("IDX 文件不合法：{0}")]
    InvalidIdx(String),

    #[error("样本下标 {index} 超出范围（共 {len} 个样本）")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("样本形状不符：期望 {expected:?}，实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 对空样本集合采样，或 batch 大小为 0
    #[error("无法采样：{0}")]
    EmptySample(String),

    #[error("无法从 {url} 获取数据：{reason}")]
    Download { url: String, reason: String },

    /// 下载内容的 MD5 与记录值不同
    #[error("MD5 校验失败：期望 {expected}，实际 {got}")]
    ChecksumMismatch { expected: String, got: String },
}
