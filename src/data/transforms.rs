//! 数据变换函数

/// 8 位像素的中点，归一化时以它为中心
const PIXEL_CENTER: f32 = 127.5;

/// 将 0-255 像素值归一化到 [-1, 1]
///
/// `x = (pixel - 127.5) / 127.5`，0 映射为 -1，255 映射为 1。
/// 该范围与生成器最后的 tanh 输出一致。
pub fn normalize_pixels(pixels: &[u8]) -> Vec<f32> {
    pixels
        .iter()
        .map(|&p| (f32::from(p) - PIXEL_CENTER) / PIXEL_CENTER)
        .collect()
}
