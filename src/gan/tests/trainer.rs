use std::path::PathBuf;

use ndarray::{Array2, s};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::data::SampleSet;
use crate::errors::GanError;
use crate::gan::{
    GanConfig, Generator, Trainer, UpdateTarget, Visualizer, discriminator_batch,
    discriminator_labels, generator_labels, noise_batch, should_render,
};
use crate::nn::NnError;

/// 只记录被调用的 epoch
#[derive(Default)]
struct RecordingVisualizer {
    epochs: Vec<usize>,
}

impl Visualizer for RecordingVisualizer {
    fn render(
        &mut self,
        epoch: usize,
        _generator: &mut Generator,
        _rng: &mut dyn RngCore,
    ) -> Result<PathBuf, GanError> {
        self.epochs.push(epoch);
        Ok(PathBuf::from(format!("epoch_{epoch}.png")))
    }
}

fn tiny_config(epochs: usize, batch_size: usize) -> GanConfig {
    GanConfig {
        epochs,
        batch_size,
        latent_dim: 4,
        image_side: 2,
        show_progress: false,
        ..GanConfig::default()
    }
}

fn tiny_dataset(n: usize) -> SampleSet {
    SampleSet::new(Array2::from_shape_fn((n, 4), |(i, j)| {
        ((i + j) % 3) as f32 - 1.0
    }))
}

#[test]
fn test_should_render_schedule() {
    let fired: Vec<usize> = (1..=45).filter(|&e| should_render(e, 20)).collect();
    assert_eq!(fired, vec![1, 20, 40]);
    for epoch in [2, 19, 21, 39, 41] {
        assert!(!should_render(epoch, 20));
    }
}

#[test]
fn test_fit_renders_on_schedule() {
    let config = GanConfig {
        render_every: 3,
        ..tiny_config(7, 2)
    };
    let mut rng = StdRng::seed_from_u64(10);
    let mut trainer = Trainer::new(config, &mut rng).unwrap();
    let mut visualizer = RecordingVisualizer::default();

    let history = trainer
        .fit(&tiny_dataset(5), &mut visualizer, &mut rng)
        .unwrap();

    assert_eq!(visualizer.epochs, vec![1, 3, 6]);
    assert_eq!(history.len(), 7);
    for (i, stats) in history.iter().enumerate() {
        assert_eq!(stats.epoch, i + 1);
        // floor(5 / 2)
        assert_eq!(stats.batches, 2);
        assert!(stats.d_loss.is_finite());
        assert!(stats.g_loss.is_finite());
        assert_eq!(stats.image.is_some(), visualizer.epochs.contains(&stats.epoch));
    }
}

#[test]
fn test_epoch_without_batches() {
    // batch 大于样本数：epoch 内不执行任何步骤
    let mut rng = StdRng::seed_from_u64(10);
    let mut trainer = Trainer::new(tiny_config(1, 8), &mut rng).unwrap();
    let before = trainer.gan().generator().parameters();

    let mut visualizer = RecordingVisualizer::default();
    let history = trainer
        .fit(&tiny_dataset(3), &mut visualizer, &mut rng)
        .unwrap();

    assert_eq!(history[0].batches, 0);
    assert!(history[0].d_loss.is_nan());
    assert_eq!(trainer.gan().generator().parameters(), before);
    assert_eq!(visualizer.epochs, vec![1]);
}

#[test]
fn test_fit_rejects_wrong_sample_len() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut trainer = Trainer::new(tiny_config(1, 2), &mut rng).unwrap();
    let dataset = SampleSet::new(Array2::zeros((4, 9)));
    let err = trainer
        .fit(&dataset, &mut RecordingVisualizer::default(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, GanError::Data(_)));
}

#[test]
fn test_trainer_rejects_invalid_config() {
    let mut rng = StdRng::seed_from_u64(10);
    let config = GanConfig {
        batch_size: 0,
        ..tiny_config(1, 2)
    };
    assert!(matches!(
        Trainer::new(config, &mut rng),
        Err(GanError::InvalidConfig(_))
    ));
}

#[test]
fn test_discriminator_batch_real_rows_first() {
    let real = Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f32);
    let fake = Array2::from_shape_fn((3, 4), |(i, j)| -((i * 4 + j) as f32) - 100.0);
    let x = discriminator_batch(&real, &fake).unwrap();
    assert_eq!(x.dim(), (6, 4));
    assert_eq!(x.slice(s![0..3, ..]), real);
    assert_eq!(x.slice(s![3..6, ..]), fake);

    // 0.9 的标签正好落在真实样本所在的行
    let labels = discriminator_labels(3, 0.9);
    for (row, label) in x.rows().into_iter().zip(labels.iter()) {
        let is_real = row.iter().all(|&v| v >= 0.0);
        assert_eq!(*label == 0.9, is_real);
    }
}

#[test]
fn test_discriminator_batch_shape_mismatch() {
    let real = Array2::<f32>::zeros((2, 4));
    let fake = Array2::<f32>::zeros((3, 4));
    match discriminator_batch(&real, &fake).unwrap_err() {
        NnError::ShapeMismatch { expected, got, .. } => {
            assert_eq!(expected, vec![2, 4]);
            assert_eq!(got, vec![3, 4]);
        }
        other => panic!("意外的错误: {other:?}"),
    }
}

/// 用同一种子逐步重放一个 batch，结果须与 `train_batch` 逐位一致
#[test]
fn test_train_batch_step_order() {
    let config = tiny_config(1, 2);
    let dataset = tiny_dataset(6);

    let mut rng_a = StdRng::seed_from_u64(7);
    let mut trainer = Trainer::new(config.clone(), &mut rng_a).unwrap();
    let (d_loss, g_loss) = trainer.train_batch(&dataset, &mut rng_a).unwrap();

    let mut rng_b = StdRng::seed_from_u64(7);
    let rng: &mut dyn RngCore = &mut rng_b;
    let mut replay = Trainer::new(config.clone(), rng).unwrap();
    let gan = replay.gan_mut();

    let d_noise = noise_batch(2, config.latent_dim, rng);
    let real = dataset.sample_batch(2, rng).unwrap();
    let fake = gan.generator_mut().generate(&d_noise, rng).unwrap();
    let x = discriminator_batch(&real, &fake).unwrap();
    let d_labels = discriminator_labels(2, config.real_label);
    let expected_d = gan
        .train_step(UpdateTarget::Discriminator, &x, &d_labels, rng)
        .unwrap();

    // 生成器使用新采样的噪声
    let g_noise = noise_batch(2, config.latent_dim, rng);
    assert_ne!(g_noise, d_noise);
    let expected_g = gan
        .train_step(UpdateTarget::Generator, &g_noise, &generator_labels(2), rng)
        .unwrap();

    assert_eq!(d_loss, expected_d);
    assert_eq!(g_loss, expected_g);
    assert_eq!(
        trainer.gan().discriminator().parameters(),
        replay.gan().discriminator().parameters()
    );
    assert_eq!(
        trainer.gan().generator().parameters(),
        replay.gan().generator().parameters()
    );
}
