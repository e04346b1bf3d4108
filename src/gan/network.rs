/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 生成器与判别器
 */

use ndarray::Array2;
use rand::RngCore;

use super::{GanConfig, discriminator_topology, generator_topology};
use crate::nn::{Mode, NnError, Sequential};

/// 生成器：将随机噪声转换为展平的图像
pub struct Generator {
    pub(super) net: Sequential,
}

impl Generator {
    pub fn new(config: &GanConfig, rng: &mut dyn RngCore) -> Result<Self, NnError> {
        let net = Sequential::new(config.latent_dim, &generator_topology(config), rng)?;
        Ok(Self { net })
    }

    /// 生成样本（推理模式）
    ///
    /// 输入: [batch, latent_dim] 的噪声
    /// 输出: [batch, sample_len] 的生成图像（值域 (-1, 1)）
    pub fn generate(
        &mut self,
        noise: &Array2<f32>,
        rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        NnError::check_features(self.latent_dim(), noise.dim(), "生成器的噪声输入")?;
        self.net.forward(noise, Mode::Eval, rng)
    }

    pub const fn latent_dim(&self) -> usize {
        self.net.in_features()
    }

    pub const fn sample_len(&self) -> usize {
        self.net.out_features()
    }

    /// 所有参数的快照
    pub fn parameters(&self) -> Vec<Array2<f32>> {
        self.net.parameters()
    }

    pub fn describe(&self) -> String {
        self.net.describe()
    }
}

/// 判别器：判断输入图像是真实的还是生成的
pub struct Discriminator {
    pub(super) net: Sequential,
}

impl Discriminator {
    pub fn new(config: &GanConfig, rng: &mut dyn RngCore) -> Result<Self, NnError> {
        let net = Sequential::new(config.sample_len(), &discriminator_topology(config), rng)?;
        Ok(Self { net })
    }

    /// 判别（推理模式，Dropout 不生效）
    ///
    /// 输入: [batch, sample_len] 的图像
    /// 输出: [batch, 1] 的判别概率（值域 (0, 1)）
    pub fn classify(
        &mut self,
        samples: &Array2<f32>,
        rng: &mut dyn RngCore,
    ) -> Result<Array2<f32>, NnError> {
        NnError::check_features(self.sample_len(), samples.dim(), "判别器的输入")?;
        self.net.forward(samples, Mode::Eval, rng)
    }

    pub const fn sample_len(&self) -> usize {
        self.net.in_features()
    }

    pub fn parameters(&self) -> Vec<Array2<f32>> {
        self.net.parameters()
    }

    pub fn describe(&self) -> String {
        self.net.describe()
    }
}
