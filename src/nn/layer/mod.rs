/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 网络层
 *
 * 每个层缓存最近一次前向传播所需的中间值，反向传播时据此计算梯度。
 * 层的拓扑由 `LayerSpec` 声明式描述，在 `Sequential::new` 中一次性消费。
 */

mod activation;
mod dropout;
mod leaky_relu;
mod linear;

pub use activation::{Sigmoid, Tanh};
pub use dropout::Dropout;
pub use leaky_relu::LeakyReLU;
pub use linear::Linear;

use enum_dispatch::enum_dispatch;
use ndarray::Array2;
use rand::RngCore;

use super::{Init, NnError};

/// 前向传播模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 训练模式：Dropout 生效
    Train,
    /// 评估（推理）模式：Dropout 不生效
    Eval,
}

/// 反向传播时需要计算梯度的对象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradTarget {
    /// 计算并保存参数梯度，同时返回对输入的梯度
    Params,
    /// 只返回对输入的梯度，参数梯度保持不变（相当于冻结该网络）
    InputOnly,
}

/// 可训练参数及其梯度的可变视图，供优化器使用
pub struct ParamSlot<'a> {
    pub value: &'a mut Array2<f32>,
    pub grad: &'a Array2<f32>,
}

/// 所有层的公共行为
#[enum_dispatch]
pub trait TraitLayer {
    /// 前向传播，输入/输出形状均为 [batch_size, features]
    fn forward(
        &mut self,
        x: &Array2<f32>,
        mode: Mode,
        rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError>;

    /// 反向传播：由输出梯度计算输入梯度
    fn backward(
        &mut self,
        grad_output: &Array2<f32>,
        target: GradTarget,
    ) -> Result<Array2<f32>, NnError>;

    /// 本层的参数（无参数的层返回空）
    fn params(&self) -> Vec<&Array2<f32>> {
        Vec::new()
    }

    fn params_and_grads(&mut self) -> Vec<ParamSlot<'_>> {
        Vec::new()
    }

    /// 给定输入维度时的输出维度
    fn out_features(&self, in_features: usize) -> usize {
        in_features
    }

    /// 用于日志的简短描述
    fn describe(&self) -> String;
}

/// 层的具体类型
#[enum_dispatch(TraitLayer)]
pub enum Layer {
    Linear,
    LeakyReLU,
    Dropout,
    Tanh,
    Sigmoid,
}

/// 声明式的层描述
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerSpec {
    Linear { out_features: usize, init: Init },
    LeakyReLU { negative_slope: f32 },
    Dropout { p: f32 },
    Tanh,
    Sigmoid,
}

impl LayerSpec {
    /// 使用默认初始化（Glorot 均匀分布）的全连接层
    pub const fn linear(out_features: usize) -> Self {
        Self::Linear {
            out_features,
            init: Init::GlorotUniform,
        }
    }

    /// 按描述构建层，`in_features` 为上一层的输出维度
    pub(crate) fn build(
        &self,
        in_features: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Layer, NnError> {
        let layer: Layer = match *self {
            Self::Linear { out_features, init } => {
                Linear::new(in_features, out_features, init, rng)?.into()
            }
            Self::LeakyReLU { negative_slope } => LeakyReLU::new(negative_slope)?.into(),
            Self::Dropout { p } => Dropout::new(p)?.into(),
            Self::Tanh => Tanh::new().into(),
            Self::Sigmoid => Sigmoid::new().into(),
        };
        Ok(layer)
    }
}

/// 反向传播前取出缓存值，若不存在则说明尚未前向传播
pub(crate) fn cached<'a>(
    cache: &'a Option<Array2<f32>>,
    layer: &str,
) -> Result<&'a Array2<f32>, NnError> {
    cache.as_ref().ok_or_else(|| {
        NnError::ComputationError(format!("{layer}层在反向传播前没有进行前向传播"))
    })
}

/// 检查输出梯度与缓存值形状一致
pub(crate) fn check_grad_shape(
    grad_output: &Array2<f32>,
    cache: &Array2<f32>,
    layer: &str,
) -> Result<(), NnError> {
    NnError::check_shape(cache.dim(), grad_output.dim(), &format!("{layer}层的输出梯度"))
}
