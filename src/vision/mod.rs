/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 本模块负责把生成的样本渲染为图像文件。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的样本是指展平的单通道方形图像，值域 [-1, 1]；
 *                 2. 输出的网格图为灰度（luma）图，墨迹为黑、背景为白。
 */

mod grid;

pub use grid::{GridLayout, GridRenderer, compose_grid, sample_to_luma};

use thiserror::Error;


/// 渲染相关错误
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("图像保存失败: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("样本形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
}
