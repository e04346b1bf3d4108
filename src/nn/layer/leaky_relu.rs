use ndarray::{Array2, Zip};
use rand::RngCore;

use super::{GradTarget, Mode, TraitLayer, cached, check_grad_shape};
use crate::nn::NnError;

/// Leaky ReLU 激活层
///
/// forward: f(x) = x if x > 0, else negative_slope * x
/// backward: d(f)/dx = 1 if x > 0, else negative_slope
pub struct LeakyReLU {
    negative_slope: f32,
    /// 缓存输入（用于反向传播时判断梯度）
    input: Option<Array2<f32>>,
}

impl LeakyReLU {
    pub fn new(negative_slope: f32) -> Result<Self, NnError> {
        if !(negative_slope >= 0.0) {
            return Err(NnError::InvalidOperation(format!(
                "LeakyReLU的negative_slope应为非负数，但得到: {negative_slope}"
            )));
        }
        Ok(Self {
            negative_slope,
            input: None,
        })
    }
}

impl TraitLayer for LeakyReLU {
    fn forward(
        &mut self,
        x: &Array2<f32>,
        _mode: Mode,
        _rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        let slope = self.negative_slope;
        let output = x.mapv(|v| if v > 0.0 { v } else { slope * v });
        self.input = Some(x.clone());
        Ok(output)
    }

    fn backward(
        &mut self,
        grad_output: &Array2<f32>,
        _target: GradTarget,
    ) -> Result<Array2<f32>, NnError> {
        let input = cached(&self.input, "LeakyReLU")?;
        check_grad_shape(grad_output, input, "LeakyReLU")?;
        let slope = self.negative_slope;
        Ok(Zip::from(grad_output)
            .and(input)
            .map_collect(|&g, &x| if x > 0.0 { g } else { slope * g }))
    }

    fn describe(&self) -> String {
        format!("LeakyReLU({})", self.negative_slope)
    }
}
