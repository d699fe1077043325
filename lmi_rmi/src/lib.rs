//! # lmi_rmi: Recursive Model Index
//! 递归模型索引
//!
//! Read-only, in-memory learned index over sorted `f64` keys. A
//! hierarchy of small regressors approximates the key→rank CDF; a
//! bounded local search over the sorted store corrects residual model
//! error.
//! 对有序 `f64` 键的只读内存学习型索引。小型回归模型层级逼近
//! 键→排名 CDF；有序存储上的有界局部查找修正模型残差。
//!
//! ## Usage / 使用方法
//!
//! ```rust
//! use lmi_rmi::{Rmi, RmiConfig};
//!
//! let data: Vec<(f64, u64)> = (0..1000).map(|i| (f64::from(i), 0)).collect();
//! let cfg = RmiConfig {
//!   stage_sizes: vec![1, 16],
//!   num_hidden_layers: 0,
//!   ..RmiConfig::default()
//! };
//! let rmi = Rmi::build(cfg, data).unwrap();
//! assert_eq!(rmi.lower_bound(123.0), 123);
//! ```

mod build;
mod config;
mod consts;
pub mod error;
mod rmi;
mod stage;
mod store;

pub use config::RmiConfig;
pub use error::{Error, Result};
pub use lmi_model::{LinearModel, Model, NetModel, Regressor, Sample};
pub use rmi::{Rmi, RmiStats};
pub use stage::Stage;
pub use store::SortedKeys;
