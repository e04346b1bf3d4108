/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Adam优化器实现
 */

use ndarray::{Array2, Zip};

use super::Optimizer;
use crate::nn::{NnError, Sequential};

/// Adam优化器
///
/// 每个实例只服务于一个网络：矩估计按参数在网络中的顺序保存。
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    /// 一阶矩估计
    m: Vec<Array2<f32>>,
    /// 二阶矩估计
    v: Vec<Array2<f32>>,
    /// 时间步
    t: usize,
}

impl Adam {
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            m: Vec::new(),
            v: Vec::new(),
            t: 0,
        }
    }

    /// 使用默认的 beta2、epsilon 创建
    ///
    /// GAN 训练通常将 beta1 调低到 0.5
    pub fn new_default(learning_rate: f32, beta1: f32) -> Self {
        Self::new(learning_rate, beta1, 0.999, 1e-7)
    }

    pub const fn steps(&self) -> usize {
        self.t
    }
}

impl Optimizer for Adam {
    fn step(&mut self, net: &mut Sequential) -> Result<(), NnError> {
        let slots = net.params_and_grads();

        if self.m.is_empty() {
            self.m = slots.iter().map(|s| Array2::zeros(s.value.dim())).collect();
            self.v = slots.iter().map(|s| Array2::zeros(s.value.dim())).collect();
        } else if self.m.len() != slots.len() {
            return Err(NnError::InvalidOperation(format!(
                "Adam优化器记录了{}个参数，但网络有{}个参数。一个优化器只能用于一个网络",
                self.m.len(),
                slots.len()
            )));
        }

        self.t += 1;
        let (beta1, beta2, eps, lr) = (self.beta1, self.beta2, self.epsilon, self.learning_rate);
        // 偏差修正系数
        let bias1 = 1.0 - beta1.powi(self.t as i32);
        let bias2 = 1.0 - beta2.powi(self.t as i32);

        for ((slot, m), v) in slots.into_iter().zip(&mut self.m).zip(&mut self.v) {
            NnError::check_shape(m.dim(), slot.grad.dim(), "Adam的参数梯度")?;
            // m = β1 * m + (1 - β1) * g;  v = β2 * v + (1 - β2) * g²
            // θ = θ - α * m_hat / (√v_hat + ε)
            Zip::from(slot.value)
                .and(slot.grad)
                .and(m)
                .and(v)
                .for_each(|theta, &g, m, v| {
                    *m = beta1 * *m + (1.0 - beta1) * g;
                    *v = beta2 * *v + (1.0 - beta2) * g * g;
                    let m_hat = *m / bias1;
                    let v_hat = *v / bias2;
                    *theta -= lr * m_hat / (v_hat.sqrt() + eps);
                });
        }
        Ok(())
    }
}
