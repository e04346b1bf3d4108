//! 生成器与判别器的声明式拓扑

use crate::nn::{Init, LayerSpec};

use super::GanConfig;

/// 生成器隐藏层宽度
pub const GENERATOR_HIDDEN: [usize; 3] = [256, 512, 1024];
/// 判别器隐藏层宽度
pub const DISCRIMINATOR_HIDDEN: [usize; 3] = [1024, 512, 256];

/// 第一层用窄正态分布初始化，其余全连接层用 Glorot 均匀分布
fn dense(out_features: usize, first: bool, config: &GanConfig) -> LayerSpec {
    let init = if first {
        Init::Normal {
            mean: 0.0,
            std: config.init_std,
        }
    } else {
        Init::GlorotUniform
    };
    LayerSpec::Linear { out_features, init }
}

/// latent_dim -> 256 -> 512 -> 1024 -> sample_len，隐藏层 LeakyReLU，输出 tanh
pub fn generator_topology(config: &GanConfig) -> Vec<LayerSpec> {
    let mut specs = Vec::new();
    for (i, &width) in GENERATOR_HIDDEN.iter().enumerate() {
        specs.push(dense(width, i == 0, config));
        specs.push(LayerSpec::LeakyReLU {
            negative_slope: config.leaky_slope,
        });
    }
    specs.push(dense(config.sample_len(), false, config));
    specs.push(LayerSpec::Tanh);
    specs
}

/// sample_len -> 1024 -> 512 -> 256 -> 1，隐藏层 LeakyReLU + Dropout，输出 sigmoid
pub fn discriminator_topology(config: &GanConfig) -> Vec<LayerSpec> {
    let mut specs = Vec::new();
    for (i, &width) in DISCRIMINATOR_HIDDEN.iter().enumerate() {
        specs.push(dense(width, i == 0, config));
        specs.push(LayerSpec::LeakyReLU {
            negative_slope: config.leaky_slope,
        });
        specs.push(LayerSpec::Dropout { p: config.dropout });
    }
    specs.push(dense(1, false, config));
    specs.push(LayerSpec::Sigmoid);
    specs
}
