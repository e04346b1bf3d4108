//! # Only GAN
//!
//! `only_gan`是一个基于[ndarray](https://docs.rs/ndarray)的全连接生成对抗网络（GAN）训练程序：
//! 在MNIST手写数字上交替训练生成器与判别器，并定期把生成的样本输出为网格图。
//!
//! - [`data`]: MNIST数据集的下载、解析与批采样
//! - [`nn`]: 全连接网络的层、损失函数与优化器
//! - [`gan`]: 生成器、判别器、组合网络与训练循环
//! - [`vision`]: 样本网格图的渲染
//!

pub mod data;
pub mod errors;
pub mod gan;
pub mod nn;
pub mod vision;
