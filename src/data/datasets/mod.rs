//! 内置数据集

pub mod mnist;

pub use mnist::{IMAGE_LEN, IMAGE_SIDE, MnistDataset, default_data_dir, load_idx_images};
