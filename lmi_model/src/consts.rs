//! Training constants / 训练常量

/// PRNG seed; identical inputs must give identical builds
/// 随机种子；相同输入必须产生相同构建
pub(crate) const SEED: u64 = 42;

/// Mini-batch size / 批大小
pub(crate) const BATCH_SIZE: usize = 128;

/// SGD learning rate / 学习率
pub(crate) const LEARNING_RATE: f64 = 0.05;

/// Training epochs / 训练轮数
pub(crate) const EPOCHS: usize = 100;

/// Key spread ratio beyond which keys get a log transform
/// 键域跨度超过此比例时启用对数变换
pub(crate) const LOG_RATIO: f64 = 100.0;

/// OLS denominator below this is a degenerate constant-key segment
/// OLS 分母低于此值视为退化的常量键段
pub(crate) const DENOM_EPS: f64 = 1e-10;
