/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 损失函数
 */

use ndarray::{Array2, Zip};

use super::NnError;

/// 二元交叉熵损失（输入为概率，而非 logits）
///
/// `loss = -mean(y * ln(p) + (1 - y) * ln(1 - p))`
///
/// 概率先被裁剪到 `[epsilon, 1 - epsilon]`，避免 `ln(0)`。
#[derive(Debug, Clone, Copy)]
pub struct BceLoss {
    epsilon: f32,
}

impl Default for BceLoss {
    fn default() -> Self {
        Self { epsilon: 1e-7 }
    }
}

impl BceLoss {
    pub fn new() -> Self {
        Self::default()
    }

    /// 计算损失值及其对预测值的梯度
    ///
    /// # 参数
    /// - `pred`: 预测概率 [batch_size, 1]
    /// - `target`: 目标标签，形状与 `pred` 相同
    ///
    /// # 返回
    /// (损失值, d(loss)/d(pred))
    pub fn forward(
        &self,
        pred: &Array2<f32>,
        target: &Array2<f32>,
    ) -> Result<(f32, Array2<f32>), NnError> {
        NnError::check_shape(pred.dim(), target.dim(), "二元交叉熵的预测值与标签")?;
        if pred.is_empty() {
            return Err(NnError::InvalidOperation(
                "二元交叉熵的输入不能为空".to_string(),
            ));
        }

        let eps = self.epsilon;
        let n = pred.len() as f32;
        let clipped = pred.mapv(|p| p.clamp(eps, 1.0 - eps));

        let total: f32 = Zip::from(&clipped)
            .and(target)
            .fold(0.0, |acc, &p, &y| acc - (y * p.ln() + (1.0 - y) * (1.0 - p).ln()));

        let grad = Zip::from(&clipped)
            .and(target)
            .map_collect(|&p, &y| (p - y) / (p * (1.0 - p)) / n);

        Ok((total / n, grad))
    }
}
