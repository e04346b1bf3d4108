use ndarray::Array2;
use rand::{Rng, RngCore};

use super::{GradTarget, Mode, TraitLayer, check_grad_shape};
use crate::nn::NnError;

/// Dropout 层（inverted dropout）
///
/// 训练模式下以概率 `p` 将元素置零，保留的元素放大 `1 / (1 - p)`；
/// 评估模式下原样输出。
pub struct Dropout {
    p: f32,
    /// 最近一次前向传播的模式，`None` 表示尚未前向传播
    last_mode: Option<Mode>,
    /// 训练模式下的缩放掩码
    mask: Option<Array2<f32>>,
}

impl Dropout {
    pub fn new(p: f32) -> Result<Self, NnError> {
        if !(0.0..1.0).contains(&p) {
            return Err(NnError::InvalidOperation(format!(
                "Dropout的丢弃概率须在[0, 1)内，但得到: {p}"
            )));
        }
        Ok(Self {
            p,
            last_mode: None,
            mask: None,
        })
    }
}

impl TraitLayer for Dropout {
    fn forward(
        &mut self,
        x: &Array2<f32>,
        mode: Mode,
        rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        self.last_mode = Some(mode);
        if mode == Mode::Eval || self.p == 0.0 {
            self.mask = None;
            return Ok(x.clone());
        }

        let keep = 1.0 - self.p;
        let scale = 1.0 / keep;
        let p = self.p;
        let mask = Array2::from_shape_simple_fn(x.dim(), || {
            if rng.r#gen::<f32>() >= p { scale } else { 0.0 }
        });
        let output = x * &mask;
        self.mask = Some(mask);
        Ok(output)
    }

    fn backward(
        &mut self,
        grad_output: &Array2<f32>,
        _target: GradTarget,
    ) -> Result<Array2<f32>, NnError> {
        if self.last_mode.is_none() {
            return Err(NnError::ComputationError(
                "Dropout层在反向传播前没有进行前向传播".to_string(),
            ));
        }
        match &self.mask {
            Some(mask) => {
                check_grad_shape(grad_output, mask, "Dropout")?;
                Ok(grad_output * mask)
            }
            None => Ok(grad_output.clone()),
        }
    }

    fn describe(&self) -> String {
        format!("Dropout({})", self.p)
    }
}
