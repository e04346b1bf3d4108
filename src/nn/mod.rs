/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 负责神经网络（neural network）的构建与训练原语
 *
 * 数值计算全部基于 `ndarray::Array2<f32>`，形状约定为 [batch_size, features]。
 */

mod criterion;
mod error;
mod init;
pub mod layer;
pub mod optimizer;
mod sequential;

pub use criterion::BceLoss;
pub use error::NnError;
pub use init::Init;
pub use layer::{GradTarget, LayerSpec, Mode};
pub use optimizer::{Adam, Optimizer};
pub use sequential::Sequential;

#[cfg(test)]
mod tests;
