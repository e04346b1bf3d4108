//! 数据加载模块
//!
//! 提供 MNIST 数据集加载、像素归一化和带放回的批量采样。
//!
//! # 主要组件
//!
//! - [`SampleSet`]: 归一化到 [-1, 1] 的扁平样本集合，支持均匀随机采样
//! - [`MnistDataset`]: MNIST 手写数字数据集（IDX 格式，支持 .gz 与自动下载）
//! - [`transforms`]: 数据变换函数
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use only_gan::data::MnistDataset;
//!
//! let samples = MnistDataset::train()?;      // [60000, 784]
//! let batch = samples.sample_batch(128, &mut rng)?;  // [128, 784]
//! ```

pub mod datasets;
pub mod download;
pub mod error;
mod sample_set;
pub mod transforms;


pub use datasets::{IMAGE_LEN, IMAGE_SIDE, MnistDataset, default_data_dir, load_idx_images};
pub use error::DataError;
pub use sample_set::SampleSet;
