/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 参数初始化策略
 */

use ndarray::Array2;
use rand::RngCore;
use rand_distr::{Distribution, Normal, Uniform};

use super::NnError;

/// 参数初始化方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// 全零
    Zeros,
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// Glorot（Xavier）均匀分布：U(-l, l)，l = sqrt(6 / (fan_in + fan_out))
    GlorotUniform,
}

impl Init {
    /// 按形状 [fan_in, fan_out] 生成参数矩阵（使用指定的 RNG）
    pub fn generate(
        &self,
        shape: (usize, usize),
        rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        let (fan_in, fan_out) = shape;
        match *self {
            Self::Zeros => Ok(Array2::zeros(shape)),
            Self::Normal { mean, std } => {
                let normal = Normal::new(mean, std).map_err(|e| {
                    NnError::InvalidOperation(format!("正态分布参数非法（std={std}）：{e}"))
                })?;
                Ok(Array2::from_shape_simple_fn(shape, || normal.sample(&mut *rng)))
            }
            Self::GlorotUniform => {
                let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
                let uniform = Uniform::new_inclusive(-limit, limit);
                Ok(Array2::from_shape_simple_fn(shape, || uniform.sample(&mut *rng)))
            }
        }
    }
}
