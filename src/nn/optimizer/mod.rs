/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 优化器模块
 */

mod adam;

pub use adam::Adam;

use super::{NnError, Sequential};

/// 优化器核心 trait
///
/// 训练循环：
/// ```ignore
/// let y = net.forward(&x, Mode::Train, &mut rng)?;
/// let (loss, grad) = criterion.forward(&y, &labels)?;
/// net.backward(&grad, GradTarget::Params)?;
/// optimizer.step(&mut net)?; // ← 只更新参数，不做 forward/backward
/// ```
///
/// 优化器只更新传入的那个网络，其余网络的参数不受影响。
pub trait Optimizer {
    /// 用网络中已计算的参数梯度更新参数
    fn step(&mut self, net: &mut Sequential) -> Result<(), NnError>;
}
