//! 有界激活函数：Tanh 与 Sigmoid
//!
//! 两者的导数都可以用输出值表示，因此只缓存输出。

use ndarray::{Array2, Zip};
use rand::RngCore;

use super::{GradTarget, Mode, TraitLayer, cached, check_grad_shape};
use crate::nn::NnError;

/// Tanh 激活层，输出范围 (-1, 1)
#[derive(Default)]
pub struct Tanh {
    output: Option<Array2<f32>>,
}

impl Tanh {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraitLayer for Tanh {
    fn forward(
        &mut self,
        x: &Array2<f32>,
        _mode: Mode,
        _rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        let output = x.mapv(f32::tanh);
        self.output = Some(output.clone());
        Ok(output)
    }

    fn backward(
        &mut self,
        grad_output: &Array2<f32>,
        _target: GradTarget,
    ) -> Result<Array2<f32>, NnError> {
        let output = cached(&self.output, "Tanh")?;
        check_grad_shape(grad_output, output, "Tanh")?;
        // d(tanh)/dx = 1 - y²
        Ok(Zip::from(grad_output)
            .and(output)
            .map_collect(|&g, &y| g * (1.0 - y * y)))
    }

    fn describe(&self) -> String {
        "Tanh".to_string()
    }
}

/// Sigmoid 激活层，输出范围 (0, 1)
#[derive(Default)]
pub struct Sigmoid {
    output: Option<Array2<f32>>,
}

impl Sigmoid {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraitLayer for Sigmoid {
    fn forward(
        &mut self,
        x: &Array2<f32>,
        _mode: Mode,
        _rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        let output = x.mapv(|v| 1.0 / (1.0 + (-v).exp()));
        self.output = Some(output.clone());
        Ok(output)
    }

    fn backward(
        &mut self,
        grad_output: &Array2<f32>,
        _target: GradTarget,
    ) -> Result<Array2<f32>, NnError> {
        let output = cached(&self.output, "Sigmoid")?;
        check_grad_shape(grad_output, output, "Sigmoid")?;
        // d(sigmoid)/dx = y * (1 - y)
        Ok(Zip::from(grad_output)
            .and(output)
            .map_collect(|&g, &y| g * y * (1.0 - y)))
    }

    fn describe(&self) -> String {
        "Sigmoid".to_string()
    }
}
