//! MNIST 手写数字数据集
//!
//! 支持：
//! - IDX 二进制图像格式解析（支持 .gz 压缩）
//! - 像素归一化 (0-255 → [-1, 1]) 并展平为 [N, 784]
//! - 可选自动下载（带 MD5 校验）
//!
//! GAN 训练只需要图像，标签文件不会被读取。

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;

use crate::data::download::download_file;
use crate::data::error::DataError;
use crate::data::SampleSet;

/// MNIST 下载地址（使用 AWS S3 镜像，原官网 yann.lecun.com 不稳定）
const MNIST_BASE_URL: &str = "https://ossci-datasets.s3.amazonaws.com/mnist/";

/// 图像文件名及其 .gz 文件的 MD5
const TRAIN_IMAGES: (&str, &str) = (
    "train-images-idx3-ubyte",
    "f68b3c2dcbeaaa9fbdd348bbdeb94873",
);
const TEST_IMAGES: (&str, &str) = (
    "t10k-images-idx3-ubyte",
    "9fb629c4189551a2d022fa330f9573f3",
);

/// IDX 图像文件的 magic number
const IDX_IMAGES_MAGIC: u32 = 2051;

pub const IMAGE_SIDE: usize = 28;
pub const IMAGE_LEN: usize = IMAGE_SIDE * IMAGE_SIDE;

/// MNIST 手写数字数据集
///
/// 包含 60,000 个训练样本和 10,000 个测试样本，
/// 每个样本是 28x28 的灰度图像，加载后展平为 784 维向量。
pub struct MnistDataset;

impl MnistDataset {
    /// 完整加载 API
    ///
    /// # 参数
    /// - `root`: 数据目录，None 则使用默认 (~/.cache/only_gan/datasets/mnist)
    /// - `train`: true=训练集(60000), false=测试集(10000)
    /// - `download`: true=自动下载缺失文件
    ///
    /// # 返回
    /// 形状为 [N, 784]、值域 [-1, 1] 的样本集合
    pub fn load(root: Option<&Path>, train: bool, download: bool) -> Result<SampleSet, DataError> {
        let data_dir = root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_data_dir().join("mnist"));

        let (base_name, md5) = if train { TRAIN_IMAGES } else { TEST_IMAGES };
        let images_path = ensure_file(&data_dir, base_name, md5, download)?;
        let samples = load_idx_images(&images_path)?;
        debug!(
            "已加载 {} 个 MNIST 样本: {}",
            samples.len(),
            images_path.display()
        );
        Ok(samples)
    }

    /// 便捷 API：加载训练集（默认路径，自动下载）
    pub fn train() -> Result<SampleSet, DataError> {
        Self::load(None, true, true)
    }
}

/// 获取默认数据目录
pub fn default_data_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("only_gan")
        .join("datasets")
}

/// 确保文件存在，必要时下载
fn ensure_file(
    data_dir: &Path,
    base_name: &str,
    md5: &str,
    download: bool,
) -> Result<PathBuf, DataError> {
    // 优先检查解压后的文件
    let uncompressed_path = data_dir.join(base_name);
    if uncompressed_path.exists() {
        return Ok(uncompressed_path);
    }

    let gz_path = data_dir.join(format!("{base_name}.gz"));
    if gz_path.exists() {
        return Ok(gz_path);
    }

    if !download {
        return Err(DataError::MissingFile(uncompressed_path));
    }
    std::fs::create_dir_all(data_dir)?;
    let url = format!("{MNIST_BASE_URL}{base_name}.gz");
    download_file(&url, &gz_path, Some(md5))?;
    Ok(gz_path)
}

/// 解析 IDX 图像文件并归一化
///
/// IDX 格式：
/// - [0-3] magic number (0x00000803 = 2051)
/// - [4-7] number of images
/// - [8-11] number of rows
/// - [12-15] number of columns
/// - [16+] pixel data (unsigned byte)
///
/// 扩展名为 `.gz` 时先解压。
pub fn load_idx_images(path: &Path) -> Result<SampleSet, DataError> {
    let file = File::open(path).map_err(|_| DataError::MissingFile(path.to_path_buf()))?;
    let mut reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut header = [0u8; 16];
    reader
        .read_exact(&mut header)
        .map_err(|e| DataError::InvalidIdx(format!("读取头部失败: {e}")))?;

    // 解析头部（大端序）
    let read_u32 = |offset: usize| {
        u32::from_be_bytes([
            header[offset],
            header[offset + 1],
            header[offset + 2],
            header[offset + 3],
        ])
    };
    let magic = read_u32(0);
    if magic != IDX_IMAGES_MAGIC {
        return Err(DataError::InvalidIdx(format!(
            "无效的 magic number: {magic} (期望 {IDX_IMAGES_MAGIC})"
        )));
    }

    let num_images = read_u32(4) as usize;
    let num_rows = read_u32(8) as usize;
    let num_cols = read_u32(12) as usize;
    if num_rows != IMAGE_SIDE || num_cols != IMAGE_SIDE {
        return Err(DataError::InvalidIdx(format!(
            "无效的图像尺寸: {num_rows}x{num_cols} (期望 {IMAGE_SIDE}x{IMAGE_SIDE})"
        )));
    }

    let mut pixels = vec![0u8; num_images * IMAGE_LEN];
    reader
        .read_exact(&mut pixels)
        .map_err(|e| DataError::InvalidIdx(format!("读取像素数据失败: {e}")))?;

    SampleSet::from_pixels(&pixels, num_images, IMAGE_LEN)
}
