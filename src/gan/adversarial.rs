/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 组合网络：生成器 + 判别器，以及两者的交替优化
 */

use ndarray::Array2;
use rand::RngCore;

use super::{Discriminator, GanConfig, Generator};
use crate::nn::{Adam, BceLoss, GradTarget, Mode, NnError, Optimizer};

/// 一次优化步骤所更新的网络
///
/// 每次调用都显式指定，另一个网络的参数在该次调用中保持不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    /// 在给定样本上训练判别器
    Discriminator,
    /// 经由冻结的判别器训练生成器
    Generator,
}

/// GAN：持有两个网络及各自的优化器
///
/// 判别器的优化器只在 `UpdateTarget::Discriminator` 时使用；
/// 组合网络的优化器只更新生成器的参数。
pub struct Gan {
    generator: Generator,
    discriminator: Discriminator,
    discriminator_optimizer: Adam,
    adversarial_optimizer: Adam,
    criterion: BceLoss,
}

impl Gan {
    pub fn new(config: &GanConfig, rng: &mut dyn RngCore) -> Result<Self, NnError> {
        let generator = Generator::new(config, rng)?;
        let discriminator = Discriminator::new(config, rng)?;
        Ok(Self {
            generator,
            discriminator,
            discriminator_optimizer: Adam::new_default(config.learning_rate, config.beta1),
            adversarial_optimizer: Adam::new_default(config.learning_rate, config.beta1),
            criterion: BceLoss::new(),
        })
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut Generator {
        &mut self.generator
    }

    pub fn discriminator(&self) -> &Discriminator {
        &self.discriminator
    }

    pub fn discriminator_mut(&mut self) -> &mut Discriminator {
        &mut self.discriminator
    }

    /// 执行一次优化步骤，返回该步的损失
    ///
    /// - `UpdateTarget::Discriminator`: `input` 为 [batch, sample_len] 的样本
    /// - `UpdateTarget::Generator`: `input` 为 [batch, latent_dim] 的噪声
    ///
    /// `labels` 形状为 [batch, 1]。
    pub fn train_step(
        &mut self,
        target: UpdateTarget,
        input: &Array2<f32>,
        labels: &Array2<f32>,
        rng: &mut dyn RngCore,
    ) -> Result<f32, NnError> {
        match target {
            UpdateTarget::Discriminator => self.discriminator_step(input, labels, rng),
            UpdateTarget::Generator => self.adversarial_step(input, labels, rng),
        }
    }

    fn discriminator_step(
        &mut self,
        samples: &Array2<f32>,
        labels: &Array2<f32>,
        rng: &mut dyn RngCore,
    ) -> Result<f32, NnError> {
        let d = &mut self.discriminator.net;
        let pred = d.forward(samples, Mode::Train, rng)?;
        let (loss, grad) = self.criterion.forward(&pred, labels)?;
        d.backward(&grad, GradTarget::Params)?;
        self.discriminator_optimizer.step(d)?;
        Ok(loss)
    }

    fn adversarial_step(
        &mut self,
        noise: &Array2<f32>,
        labels: &Array2<f32>,
        rng: &mut dyn RngCore,
    ) -> Result<f32, NnError> {
        NnError::check_features(
            self.generator.latent_dim(),
            noise.dim(),
            "组合网络的噪声输入",
        )?;
        let g = &mut self.generator.net;
        let d = &mut self.discriminator.net;

        let fake = g.forward(noise, Mode::Train, rng)?;
        let pred = d.forward(&fake, Mode::Train, rng)?;
        let (loss, grad) = self.criterion.forward(&pred, labels)?;

        // 判别器冻结：梯度只穿过它，不修改其参数梯度
        let grad_fake = d.backward(&grad, GradTarget::InputOnly)?;
        g.backward(&grad_fake, GradTarget::Params)?;
        self.adversarial_optimizer.step(g)?;
        Ok(loss)
    }
}
