/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 扁平样本集合，支持带放回的均匀随机批量采样
 */

use ndarray::{Array2, ArrayView1, Axis};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::DataError;
use super::transforms::normalize_pixels;

/// 样本集合，形状 [N, sample_len]，加载后不再修改
#[derive(Debug, Clone)]
pub struct SampleSet {
    samples: Array2<f32>,
}

impl SampleSet {
    pub fn new(samples: Array2<f32>) -> Self {
        Self { samples }
    }

    /// 由原始 8 位像素构建，像素被归一化到 [-1, 1]
    ///
    /// # 参数
    /// - `pixels`: 按样本依次排列的像素，长度须为 `num_samples * sample_len`
    pub fn from_pixels(
        pixels: &[u8],
        num_samples: usize,
        sample_len: usize,
    ) -> Result<Self, DataError> {
        if pixels.len() != num_samples * sample_len {
            return Err(DataError::ShapeMismatch {
                expected: vec![num_samples, sample_len],
                got: vec![pixels.len()],
            });
        }
        let data = normalize_pixels(pixels);
        let samples = Array2::from_shape_vec((num_samples, sample_len), data).map_err(|_| {
            DataError::ShapeMismatch {
                expected: vec![num_samples, sample_len],
                got: vec![pixels.len()],
            }
        })?;
        Ok(Self { samples })
    }

    /// 样本数量
    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 单个样本的长度（如 MNIST 为 784）
    pub fn sample_len(&self) -> usize {
        self.samples.ncols()
    }

    /// 所有样本
    pub fn samples(&self) -> &Array2<f32> {
        &self.samples
    }

    /// 获取第 index 个样本
    pub fn get(&self, index: usize) -> Result<ArrayView1<'_, f32>, DataError> {
        if index >= self.len() {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.samples.row(index))
    }

    /// 每个 epoch 的 batch 数：`floor(N / batch_size)`
    pub fn batch_count(&self, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        self.len() / batch_size
    }

    /// 带放回地均匀采样 `batch_size` 个样本，返回 [batch_size, sample_len]
    pub fn sample_batch<R: Rng + ?Sized>(
        &self,
        batch_size: usize,
        rng: &mut R,
    ) -> Result<Array2<f32>, DataError> {
        if self.is_empty() {
            return Err(DataError::EmptySample("样本集合为空".to_string()));
        }
        if batch_size == 0 {
            return Err(DataError::EmptySample("batch 大小必须大于 0".to_string()));
        }
        let uniform = Uniform::new(0, self.len());
        let indices: Vec<usize> = (0..batch_size).map(|_| uniform.sample(&mut *rng)).collect();
        Ok(self.samples.select(Axis(0), &indices))
    }
}
