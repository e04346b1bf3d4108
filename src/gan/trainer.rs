/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : GAN 训练循环
 *
 * 每个 batch 严格按顺序执行：
 * 1. 采样噪声，生成假图像；带放回地采样真实图像
 * 2. 拼接 [真实; 生成]，标签为 [0.9; 0.0]，训练判别器
 * 3. 重新采样噪声，标签全为 1.0，经冻结的判别器训练生成器
 */

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array2, Axis, concatenate};
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use tracing::{debug, info};

use super::{Gan, GanConfig, Generator, UpdateTarget};
use crate::data::{DataError, SampleSet};
use crate::errors::GanError;
use crate::nn::NnError;

/// 样本图输出端
///
/// 训练循环在需要输出样本图的 epoch 调用它。
pub trait Visualizer {
    /// 用当前生成器输出第 `epoch` 个 epoch 的样本图，返回写入的文件路径
    fn render(
        &mut self,
        epoch: usize,
        generator: &mut Generator,
        rng: &mut dyn RngCore,
    ) -> Result<PathBuf, GanError>;
}

/// 单个 epoch 的统计
#[derive(Debug, Clone, PartialEq)]
pub struct EpochStats {
    /// 从 1 开始
    pub epoch: usize,
    pub batches: usize,
    /// 判别器损失的均值（无 batch 时为 NaN）
    pub d_loss: f32,
    /// 生成器损失的均值（无 batch 时为 NaN）
    pub g_loss: f32,
    /// 本 epoch 输出的样本图
    pub image: Option<PathBuf>,
}

/// 是否在第 `epoch` 个 epoch（从 1 开始）结束后输出样本图
pub const fn should_render(epoch: usize, every: usize) -> bool {
    epoch == 1 || (every > 0 && epoch % every == 0)
}

/// [rows, latent_dim] 的标准正态噪声
pub fn noise_batch(rows: usize, latent_dim: usize, rng: &mut dyn RngCore) -> Array2<f32> {
    Array2::from_shape_simple_fn((rows, latent_dim), || StandardNormal.sample(&mut *rng))
}

/// 判别器标签 [2 * batch_size, 1]：前一半为 `real_label`，后一半为 0
pub fn discriminator_labels(batch_size: usize, real_label: f32) -> Array2<f32> {
    Array2::from_shape_fn((2 * batch_size, 1), |(i, _)| {
        if i < batch_size { real_label } else { 0.0 }
    })
}

/// 生成器标签 [batch_size, 1]：全部为 1（不做标签平滑）
pub fn generator_labels(batch_size: usize) -> Array2<f32> {
    Array2::ones((batch_size, 1))
}

/// 判别器的训练输入 [2 * batch_size, sample_len]：真实样本在前，生成样本在后
///
/// 行顺序与 `discriminator_labels` 对应。
pub fn discriminator_batch(
    real: &Array2<f32>,
    fake: &Array2<f32>,
) -> Result<Array2<f32>, NnError> {
    NnError::check_shape(real.dim(), fake.dim(), "真实样本与生成样本")?;
    concatenate(Axis(0), &[real.view(), fake.view()]).map_err(|e| {
        NnError::ComputationError(format!("真实样本与生成样本无法拼接: {e}"))
    })
}

/// GAN 训练器
pub struct Trainer {
    config: GanConfig,
    gan: Gan,
}

impl Trainer {
    pub fn new(config: GanConfig, rng: &mut dyn RngCore) -> Result<Self, GanError> {
        config.validate()?;
        let gan = Gan::new(&config, rng)?;
        info!("生成器: {}", gan.generator().describe());
        info!("判别器: {}", gan.discriminator().describe());
        Ok(Self { config, gan })
    }

    pub fn config(&self) -> &GanConfig {
        &self.config
    }

    pub fn gan(&self) -> &Gan {
        &self.gan
    }

    pub fn gan_mut(&mut self) -> &mut Gan {
        &mut self.gan
    }

    /// 训练 `config.epochs` 个 epoch，返回每个 epoch 的统计
    pub fn fit(
        &mut self,
        dataset: &SampleSet,
        visualizer: &mut dyn Visualizer,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<EpochStats>, GanError> {
        if dataset.sample_len() != self.config.sample_len() {
            return Err(DataError::ShapeMismatch {
                expected: vec![dataset.len(), self.config.sample_len()],
                got: vec![dataset.len(), dataset.sample_len()],
            }
            .into());
        }

        let batch_count = dataset.batch_count(self.config.batch_size);
        info!(
            "开始训练: {} 个样本, {} 个 epoch, 每个 epoch {} 个 batch (batch 大小 {})",
            dataset.len(),
            self.config.epochs,
            batch_count,
            self.config.batch_size
        );

        let mut history = Vec::with_capacity(self.config.epochs);
        for epoch in 1..=self.config.epochs {
            let mut stats = self.train_epoch(epoch, dataset, rng)?;
            if should_render(epoch, self.config.render_every) {
                let path = visualizer.render(epoch, self.gan.generator_mut(), rng)?;
                info!("样本图已保存: {}", path.display());
                stats.image = Some(path);
            }
            history.push(stats);
        }
        Ok(history)
    }

    /// 训练一个 epoch：`floor(N / batch_size)` 个 batch
    pub fn train_epoch(
        &mut self,
        epoch: usize,
        dataset: &SampleSet,
        rng: &mut dyn RngCore,
    ) -> Result<EpochStats, GanError> {
        info!("{} Epoch {} {}", "-".repeat(15), epoch, "-".repeat(15));
        let batch_count = dataset.batch_count(self.config.batch_size);
        let progress = self.progress_bar(batch_count);

        let (mut d_sum, mut g_sum) = (0.0, 0.0);
        for _ in 0..batch_count {
            let (d_loss, g_loss) = self.train_batch(dataset, rng)?;
            d_sum += d_loss;
            g_sum += g_loss;
            progress.inc(1);
        }
        progress.finish_and_clear();

        let n = batch_count as f32;
        let stats = EpochStats {
            epoch,
            batches: batch_count,
            d_loss: d_sum / n,
            g_loss: g_sum / n,
            image: None,
        };
        info!(
            "Epoch {}: D_loss={:.4}, G_loss={:.4}",
            epoch, stats.d_loss, stats.g_loss
        );
        Ok(stats)
    }

    /// 训练一个 batch，返回 (判别器损失, 生成器损失)
    pub fn train_batch(
        &mut self,
        dataset: &SampleSet,
        rng: &mut dyn RngCore,
    ) -> Result<(f32, f32), GanError> {
        let batch_size = self.config.batch_size;
        let latent_dim = self.config.latent_dim;

        // 判别器
        let d_noise = noise_batch(batch_size, latent_dim, rng);
        let real = dataset.sample_batch(batch_size, rng)?;
        let fake = self.gan.generator_mut().generate(&d_noise, rng)?;
        let x = discriminator_batch(&real, &fake)?;
        let d_labels = discriminator_labels(batch_size, self.config.real_label);
        let d_loss = self
            .gan
            .train_step(UpdateTarget::Discriminator, &x, &d_labels, rng)?;

        // 生成器：重新采样噪声
        let g_noise = noise_batch(batch_size, latent_dim, rng);
        let g_labels = generator_labels(batch_size);
        let g_loss = self
            .gan
            .train_step(UpdateTarget::Generator, &g_noise, &g_labels, rng)?;

        debug!("d_loss={d_loss:.4}, g_loss={g_loss:.4}");
        Ok((d_loss, g_loss))
    }

    fn progress_bar(&self, batch_count: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
        )
        .map(|s| s.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(batch_count as u64);
        bar.set_style(style);
        bar
    }
}
