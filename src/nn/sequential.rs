/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 顺序网络：按声明的层描述依次堆叠
 */

use ndarray::Array2;
use rand::RngCore;

use super::layer::{GradTarget, Layer, LayerSpec, Mode, ParamSlot, TraitLayer};
use super::NnError;

/// 顺序网络
///
/// 由 `&[LayerSpec]` 一次性构建，之后层结构不再改变。
/// 反向传播依赖最近一次 `forward` 缓存在各层中的中间值，
/// 因此 `backward` 必须紧跟在对应的 `forward` 之后调用。
///
/// # 使用示例
/// ```ignore
/// let specs = [
///     LayerSpec::linear(16),
///     LayerSpec::LeakyReLU { negative_slope: 0.2 },
///     LayerSpec::linear(1),
///     LayerSpec::Sigmoid,
/// ];
/// let mut net = Sequential::new(8, &specs, &mut rng)?;
/// let y = net.forward(&x, Mode::Train, &mut rng)?;
/// let grad_x = net.backward(&grad_y, GradTarget::Params)?;
/// ```
pub struct Sequential {
    layers: Vec<Layer>,
    in_features: usize,
    out_features: usize,
}

impl Sequential {
    pub fn new(
        in_features: usize,
        specs: &[LayerSpec],
        rng: &mut dyn RngCore,
    ) -> Result<Self, NnError> {
        if specs.is_empty() {
            return Err(NnError::InvalidOperation("网络至少需要1个层".to_string()));
        }
        if in_features == 0 {
            return Err(NnError::InvalidOperation("网络的输入维度必须大于0".to_string()));
        }

        let mut layers = Vec::with_capacity(specs.len());
        let mut width = in_features;
        for spec in specs {
            let layer = spec.build(width, rng)?;
            width = layer.out_features(width);
            layers.push(layer);
        }

        Ok(Self {
            layers,
            in_features,
            out_features: width,
        })
    }

    pub const fn in_features(&self) -> usize {
        self.in_features
    }

    pub const fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// 前向传播：[batch_size, in_features] -> [batch_size, out_features]
    pub fn forward(
        &mut self,
        x: &Array2<f32>,
        mode: Mode,
        rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        NnError::check_features(self.in_features, x.dim(), "网络的输入")?;
        let (first, rest) = self
            .layers
            .split_first_mut()
            .ok_or_else(|| NnError::ComputationError("网络没有任何层".to_string()))?;
        let mut h = first.forward(x, mode, rng)?;
        for layer in rest {
            h = layer.forward(&h, mode, rng)?;
        }
        Ok(h)
    }

    /// 反向传播：由对输出的梯度计算对输入的梯度
    ///
    /// `target` 为 `GradTarget::InputOnly` 时各层参数梯度保持不变，
    /// 用于让梯度“穿过”一个被冻结的网络。
    pub fn backward(
        &mut self,
        grad_output: &Array2<f32>,
        target: GradTarget,
    ) -> Result<Array2<f32>, NnError> {
        let mut grad = grad_output.clone();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad, target)?;
        }
        Ok(grad)
    }

    /// 所有参数的快照（按层顺序）
    pub fn parameters(&self) -> Vec<Array2<f32>> {
        self.layers
            .iter()
            .flat_map(|layer| layer.params())
            .cloned()
            .collect()
    }

    /// 参数数量（标量个数）
    pub fn num_params(&self) -> usize {
        self.layers
            .iter()
            .flat_map(|layer| layer.params())
            .map(|p| p.len())
            .sum()
    }

    pub(crate) fn params_and_grads(&mut self) -> Vec<ParamSlot<'_>> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.params_and_grads())
            .collect()
    }

    /// 网络结构的简短描述，如 `Linear(100 -> 256) -> LeakyReLU(0.2) -> ...`
    pub fn describe(&self) -> String {
        self.layers
            .iter()
            .map(|layer| layer.describe())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
