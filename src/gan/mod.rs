/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 全连接 GAN：生成器、判别器、组合网络与训练循环
 *
 * # 结构
 * - Generator: 噪声(100) -> 256 -> 512 -> 1024 -> 图像(784, tanh)
 * - Discriminator: 图像(784) -> 1024 -> 512 -> 256 -> 真/假概率(1, sigmoid)
 * - Gan: 生成器 + 冻结的判别器，只用于把判别器的反馈传回生成器
 */

mod adversarial;
mod config;
mod network;
mod topology;
mod trainer;

pub use adversarial::{Gan, UpdateTarget};
pub use config::GanConfig;
pub use network::{Discriminator, Generator};
pub use topology::{
    DISCRIMINATOR_HIDDEN, GENERATOR_HIDDEN, discriminator_topology, generator_topology,
};
pub use trainer::{
    EpochStats, Trainer, Visualizer, discriminator_batch, discriminator_labels, generator_labels,
    noise_batch, should_render,
};

#[cfg(test)]
mod tests;
