/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 训练配置
 */

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::GanError;

/// GAN 训练配置
///
/// 默认值即程序入口使用的固定配置（400 个 epoch，batch 大小 128）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanConfig {
    /// 训练的 epoch 数
    pub epochs: usize,
    pub batch_size: usize,
    /// 噪声向量维度
    pub latent_dim: usize,
    /// 图像边长，样本维度为其平方
    pub image_side: usize,
    pub learning_rate: f32,
    /// Adam 的一阶矩衰减率
    pub beta1: f32,
    /// 判别器训练时真实样本的标签（单边标签平滑）
    pub real_label: f32,
    pub leaky_slope: f32,
    /// 判别器隐藏层后的丢弃概率
    pub dropout: f32,
    /// 第一层权重的正态初始化标准差
    pub init_std: f32,
    /// 第 1 个 epoch 以及每隔多少个 epoch 输出一次样本图
    pub render_every: usize,
    /// 样本图的网格行数与列数
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// 样本图的输出目录
    pub output_dir: PathBuf,
    /// 随机数种子
    pub seed: u64,
    /// 是否显示每个 epoch 的进度条
    pub show_progress: bool,
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            epochs: 400,
            batch_size: 128,
            latent_dim: 100,
            image_side: 28,
            learning_rate: 0.0002,
            beta1: 0.5,
            real_label: 0.9,
            leaky_slope: 0.2,
            dropout: 0.3,
            init_std: 0.02,
            render_every: 20,
            grid_rows: 10,
            grid_cols: 10,
            output_dir: PathBuf::from("."),
            seed: 10,
            show_progress: true,
        }
    }
}

impl GanConfig {
    /// 单个样本的维度
    pub const fn sample_len(&self) -> usize {
        self.image_side * self.image_side
    }

    /// 每张样本图包含的样本数
    pub const fn grid_samples(&self) -> usize {
        self.grid_rows * self.grid_cols
    }

    /// 便于日志输出的 JSON 文本
    pub fn to_json(&self) -> Result<String, GanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), GanError> {
        let positive = [
            ("batch_size", self.batch_size),
            ("latent_dim", self.latent_dim),
            ("image_side", self.image_side),
            ("render_every", self.render_every),
            ("grid_rows", self.grid_rows),
            ("grid_cols", self.grid_cols),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(GanError::InvalidConfig(format!("{name}须大于0")));
        }
        if !(self.learning_rate > 0.0) {
            return Err(GanError::InvalidConfig(format!(
                "learning_rate须大于0，但得到: {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.beta1) {
            return Err(GanError::InvalidConfig(format!(
                "beta1须在[0, 1)内，但得到: {}",
                self.beta1
            )));
        }
        if !(self.real_label > 0.0 && self.real_label <= 1.0) {
            return Err(GanError::InvalidConfig(format!(
                "real_label须在(0, 1]内，但得到: {}",
                self.real_label
            )));
        }
        Ok(())
    }
}
