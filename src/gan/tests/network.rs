use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::gan::{Discriminator, GanConfig, Generator, noise_batch};
use crate::nn::NnError;

#[test]
fn test_generator_output_range() {
    let config = GanConfig::default();
    let mut rng = StdRng::seed_from_u64(10);
    let mut generator = Generator::new(&config, &mut rng).unwrap();
    assert_eq!(generator.latent_dim(), 100);
    assert_eq!(generator.sample_len(), 784);

    for batch in [1, 3] {
        let noise = noise_batch(batch, 100, &mut rng);
        let samples = generator.generate(&noise, &mut rng).unwrap();
        assert_eq!(samples.dim(), (batch, 784));
        assert!(samples.iter().all(|&v| v > -1.0 && v < 1.0));
    }
}

#[test]
fn test_discriminator_output_range() {
    let config = GanConfig::default();
    let mut rng = StdRng::seed_from_u64(10);
    let mut discriminator = Discriminator::new(&config, &mut rng).unwrap();
    assert_eq!(discriminator.sample_len(), 784);

    for batch in [1, 3] {
        let samples = Array2::from_shape_fn((batch, 784), |(i, j)| {
            ((i * 784 + j) % 255) as f32 / 127.5 - 1.0
        });
        let prob = discriminator.classify(&samples, &mut rng).unwrap();
        assert_eq!(prob.dim(), (batch, 1));
        assert!(prob.iter().all(|&p| p > 0.0 && p < 1.0));
    }
}

#[test]
fn test_wrong_input_width() {
    let config = GanConfig::default();
    let mut rng = StdRng::seed_from_u64(10);
    let mut generator = Generator::new(&config, &mut rng).unwrap();
    let mut discriminator = Discriminator::new(&config, &mut rng).unwrap();

    let err = generator
        .generate(&Array2::zeros((2, 99)), &mut rng)
        .unwrap_err();
    assert!(matches!(err, NnError::ShapeMismatch { .. }));

    let err = discriminator
        .classify(&Array2::zeros((2, 783)), &mut rng)
        .unwrap_err();
    assert!(matches!(err, NnError::ShapeMismatch { .. }));
}

#[test]
fn test_network_topology() {
    let config = GanConfig::default();
    let mut rng = StdRng::seed_from_u64(10);
    let generator = Generator::new(&config, &mut rng).unwrap();
    let discriminator = Discriminator::new(&config, &mut rng).unwrap();

    assert_eq!(
        generator.describe(),
        "Linear(100 -> 256) -> LeakyReLU(0.2) -> Linear(256 -> 512) -> LeakyReLU(0.2) -> \
         Linear(512 -> 1024) -> LeakyReLU(0.2) -> Linear(1024 -> 784) -> Tanh"
    );
    assert_eq!(
        discriminator.describe(),
        "Linear(784 -> 1024) -> LeakyReLU(0.2) -> Dropout(0.3) -> Linear(1024 -> 512) -> \
         LeakyReLU(0.2) -> Dropout(0.3) -> Linear(512 -> 256) -> LeakyReLU(0.2) -> \
         Dropout(0.3) -> Linear(256 -> 1) -> Sigmoid"
    );

    // 每个全连接层一个权重一个偏置
    assert_eq!(generator.parameters().len(), 8);
    assert_eq!(discriminator.parameters().len(), 8);
}

#[test]
fn test_first_layer_narrow_init_and_zero_bias() {
    let config = GanConfig::default();
    let mut rng = StdRng::seed_from_u64(10);
    let generator = Generator::new(&config, &mut rng).unwrap();
    let params = generator.parameters();

    // N(0, 0.02)：绝大多数权重的绝对值小于 0.1
    let w0 = &params[0];
    assert_eq!(w0.dim(), (100, 256));
    let wide = w0.iter().filter(|v| v.abs() > 0.1).count();
    assert!(wide < 10, "第一层权重过宽: {wide}");

    for bias in params.iter().skip(1).step_by(2) {
        assert!(bias.iter().all(|&b| b == 0.0));
    }
}
