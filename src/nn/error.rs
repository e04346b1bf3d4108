/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : nn 模块的错误类型
 */

use thiserror::Error;

/// 网络构建、前向/反向传播及优化过程中的错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NnError {
    #[error("形状不匹配（{message}）：期望 {expected:?}，实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("非法操作：{0}")]
    InvalidOperation(String),
    #[error("计算错误：{0}")]
    ComputationError(String),
}

impl NnError {
    /// 二维矩阵的形状比较，不一致时返回 `ShapeMismatch`
    pub(crate) fn check_shape(
        expected: (usize, usize),
        got: (usize, usize),
        message: &str,
    ) -> Result<(), Self> {
        if expected == got {
            return Ok(());
        }
        Err(Self::ShapeMismatch {
            expected: vec![expected.0, expected.1],
            got: vec![got.0, got.1],
            message: message.to_string(),
        })
    }

    /// 仅比较列数（特征维度），batch 维度任意
    pub(crate) fn check_features(
        expected: usize,
        got: (usize, usize),
        message: &str,
    ) -> Result<(), Self> {
        Self::check_shape((got.0, expected), got, message)
    }
}
