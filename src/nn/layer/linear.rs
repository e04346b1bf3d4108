/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Linear (全连接) 层
 */

use ndarray::{Array2, Axis};
use rand::RngCore;

use super::{GradTarget, Mode, ParamSlot, TraitLayer, cached};
use crate::nn::{Init, NnError};

/// Linear (全连接) 层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Array2<f32>,
    /// 偏置参数 [1, out_features]，零初始化
    bias: Array2<f32>,
    grad_weights: Array2<f32>,
    grad_bias: Array2<f32>,
    /// 最近一次前向传播的输入
    input: Option<Array2<f32>>,
}

impl Linear {
    pub fn new(
        in_features: usize,
        out_features: usize,
        init: Init,
        rng: &mut dyn RngCore,
    ) -> Result<Self, NnError> {
        if in_features == 0 || out_features == 0 {
            return Err(NnError::InvalidOperation(format!(
                "Linear层的维度必须大于0，但得到: {in_features} -> {out_features}"
            )));
        }
        let weights = init.generate((in_features, out_features), rng)?;
        Ok(Self {
            weights,
            bias: Array2::zeros((1, out_features)),
            grad_weights: Array2::zeros((in_features, out_features)),
            grad_bias: Array2::zeros((1, out_features)),
            input: None,
        })
    }

    pub fn in_features(&self) -> usize {
        self.weights.nrows()
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn bias(&self) -> &Array2<f32> {
        &self.bias
    }
}

impl TraitLayer for Linear {
    fn forward(
        &mut self,
        x: &Array2<f32>,
        _mode: Mode,
        _rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        NnError::check_features(self.in_features(), x.dim(), "Linear层的输入")?;
        let output = x.dot(&self.weights) + &self.bias;
        self.input = Some(x.clone());
        Ok(output)
    }

    fn backward(
        &mut self,
        grad_output: &Array2<f32>,
        target: GradTarget,
    ) -> Result<Array2<f32>, NnError> {
        let input = cached(&self.input, "Linear")?;
        NnError::check_shape(
            (input.nrows(), self.weights.ncols()),
            grad_output.dim(),
            "Linear层的输出梯度",
        )?;

        if target == GradTarget::Params {
            self.grad_weights = input.t().dot(grad_output);
            self.grad_bias = grad_output.sum_axis(Axis(0)).insert_axis(Axis(0));
        }
        Ok(grad_output.dot(&self.weights.t()))
    }

    fn params(&self) -> Vec<&Array2<f32>> {
        vec![&self.weights, &self.bias]
    }

    fn params_and_grads(&mut self) -> Vec<ParamSlot<'_>> {
        vec![
            ParamSlot {
                value: &mut self.weights,
                grad: &self.grad_weights,
            },
            ParamSlot {
                value: &mut self.bias,
                grad: &self.grad_bias,
            },
        ]
    }

    fn out_features(&self, _in_features: usize) -> usize {
        self.weights.ncols()
    }

    fn describe(&self) -> String {
        format!("Linear({} -> {})", self.weights.nrows(), self.weights.ncols())
    }
}
