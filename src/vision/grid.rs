use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use ndarray::{Array2, ArrayView1};
use rand::RngCore;
use tracing::debug;

use super::VisionError;
use crate::errors::GanError;
use crate::gan::{GanConfig, Generator, Visualizer, noise_batch};

const WHITE: u8 = 255;

/// 网格布局：`rows x cols` 个边长为 `side` 的方形样本，紧密排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub side: usize,
}

impl GridLayout {
    pub const fn new(rows: usize, cols: usize, side: usize) -> Self {
        Self { rows, cols, side }
    }

    pub const fn num_samples(&self) -> usize {
        self.rows * self.cols
    }

    /// 整张图的 (宽, 高)
    pub const fn image_size(&self) -> (u32, u32) {
        ((self.cols * self.side) as u32, (self.rows * self.side) as u32)
    }
}

/// 将单个样本映射为灰度像素（反转灰度：值越大越黑）
///
/// 每个样本单独按其最小/最大值拉伸到 [0, 255]；所有值相同时输出全白。
pub fn sample_to_luma(sample: ArrayView1<'_, f32>) -> Vec<u8> {
    let (min, max) = sample
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    sample
        .iter()
        .map(|&v| {
            if !(range > 0.0) {
                return WHITE;
            }
            let t = ((v - min) / range).clamp(0.0, 1.0);
            (f32::from(WHITE) * (1.0 - t)).round() as u8
        })
        .collect()
}

/// 把 [num_samples, side * side] 的样本拼成一张网格灰度图
pub fn compose_grid(samples: &Array2<f32>, layout: &GridLayout) -> Result<GrayImage, VisionError> {
    let expected = [layout.num_samples(), layout.side * layout.side];
    if samples.dim() != (expected[0], expected[1]) {
        return Err(VisionError::ShapeMismatch {
            expected: expected.to_vec(),
            got: samples.shape().to_vec(),
        });
    }

    let (width, height) = layout.image_size();
    let mut image = GrayImage::from_pixel(width, height, Luma([WHITE]));
    let side = layout.side;
    for (index, sample) in samples.rows().into_iter().enumerate() {
        let (row, col) = (index / layout.cols, index % layout.cols);
        let (x0, y0) = (col * side, row * side);
        for (k, pixel) in sample_to_luma(sample).into_iter().enumerate() {
            let (y, x) = (k / side, k % side);
            image.put_pixel((x0 + x) as u32, (y0 + y) as u32, Luma([pixel]));
        }
    }
    Ok(image)
}

/// 将生成器的样本输出为 `gan_generated_image_epoch_<epoch>.png`
pub struct GridRenderer {
    output_dir: PathBuf,
    layout: GridLayout,
}

impl GridRenderer {
    pub fn new(output_dir: impl AsRef<Path>, layout: GridLayout) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            layout,
        }
    }

    pub fn from_config(config: &GanConfig) -> Self {
        Self::new(
            &config.output_dir,
            GridLayout::new(config.grid_rows, config.grid_cols, config.image_side),
        )
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// 第 `epoch` 个 epoch 的输出路径，同名文件会被覆盖
    pub fn path_for_epoch(&self, epoch: usize) -> PathBuf {
        self.output_dir
            .join(format!("gan_generated_image_epoch_{epoch}.png"))
    }

    /// 采样噪声、生成样本并保存网格图
    pub fn render_epoch(
        &self,
        epoch: usize,
        generator: &mut Generator,
        rng: &mut dyn RngCore,
    ) -> Result<PathBuf, GanError> {
        let noise = noise_batch(self.layout.num_samples(), generator.latent_dim(), rng);
        let samples = generator.generate(&noise, rng)?;
        let image = compose_grid(&samples, &self.layout)?;

        std::fs::create_dir_all(&self.output_dir).map_err(VisionError::from)?;
        let path = self.path_for_epoch(epoch);
        image.save(&path).map_err(VisionError::from)?;
        debug!("已写入 {}", path.display());
        Ok(path)
    }
}

impl Visualizer for GridRenderer {
    fn render(
        &mut self,
        epoch: usize,
        generator: &mut Generator,
        rng: &mut dyn RngCore,
    ) -> Result<PathBuf, GanError> {
        self.render_epoch(epoch, generator, rng)
    }
}
