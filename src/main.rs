/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 在 MNIST 训练集上训练全连接 GAN，样本图输出到当前目录
 */

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use only_gan::data::MnistDataset;
use only_gan::errors::GanError;
use only_gan::gan::{GanConfig, Trainer};
use only_gan::vision::GridRenderer;

fn main() -> Result<(), GanError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = GanConfig::default();
    let json = config.to_json()?;
    info!("训练配置:\n{json}");

    let mut rng = StdRng::seed_from_u64(config.seed);

    info!("加载 MNIST 训练集...");
    let dataset = MnistDataset::train()?;
    info!("训练集: {} 个样本", dataset.len());

    let mut renderer = GridRenderer::from_config(&config);
    let mut trainer = Trainer::new(config, &mut rng)?;
    let history = trainer.fit(&dataset, &mut renderer, &mut rng)?;

    if let Some(last) = history.last() {
        info!(
            "训练完成: 共 {} 个 epoch, 最后 D_loss={:.4}, G_loss={:.4}",
            last.epoch, last.d_loss, last.g_loss
        );
    }
    Ok(())
}
