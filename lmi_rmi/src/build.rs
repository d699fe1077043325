//! Top-down stage construction and routing
//! 自顶向下的阶段构建与路由

#![allow(
  clippy::cast_precision_loss,
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss
)]

use lmi_model::{LinearModel, Model, NetModel, Regressor, Sample};
use log::debug;

use crate::{config::RmiConfig, stage::Stage};

/// Train every stage, routing each sample to exactly one model per
/// stage by its predicted global rank normalized to the next stage's
/// width. Residuals are recorded in the same pass.
/// 训练各阶段，按归一化到下一阶段宽度的预测全局排名，将每个样本
/// 路由到每阶段的唯一模型。残差在同一趟中记录。
pub(crate) fn build_stages(cfg: &RmiConfig, samples: &[Sample]) -> Vec<Stage> {
  debug_assert!(!samples.is_empty());

  let total = samples.len() as f64;
  let mut stages = Vec::with_capacity(cfg.stage_sizes.len());

  // Per-model training buckets for the stage being built
  // 当前阶段每个模型的训练桶
  let mut buckets: Vec<Vec<Sample>> = vec![samples.to_vec()];

  for (s, &width) in cfg.stage_sizes.iter().enumerate() {
    let next_width = cfg.stage_sizes.get(s + 1).copied();
    let mut next: Vec<Vec<Sample>> = next_width.map_or_else(Vec::new, |w| vec![Vec::new(); w]);
    let mut stage = Stage::with_width(width);
    let mut trained = 0usize;

    for bucket in &buckets {
      if bucket.is_empty() {
        // Constant-zero placeholder keeps routing total
        // 常量零占位模型保持路由完整
        stage.models.push(Model::Linear(LinearModel::default()));
        stage.min_errors.push(0.0);
        stage.max_errors.push(0.0);
        continue;
      }

      let mut model = if s == 0 && cfg.num_hidden_layers > 0 {
        Model::Net(NetModel::new(cfg.hidden_size, cfg.num_hidden_layers))
      } else {
        Model::Linear(LinearModel::default())
      };
      model.train(bucket);
      trained += 1;

      let mut min_err = f64::INFINITY;
      let mut max_err = f64::NEG_INFINITY;

      for &(key, pos) in bucket {
        let pred = model.predict(key);
        let err = pred - pos as f64;
        min_err = min_err.min(err);
        max_err = max_err.max(err);

        if let Some(w) = next_width {
          let clamped = pred.clamp(0.0, total - 1.0);
          let target = ((clamped / total) * w as f64) as usize;
          next[target.min(w - 1)].push((key, pos));
        }
      }

      stage.models.push(model);
      stage.min_errors.push(min_err);
      stage.max_errors.push(max_err);
    }

    debug!(
      "stage {s}: width={width} trained={trained} routed={}",
      next.iter().map(Vec::len).sum::<usize>()
    );

    stages.push(stage);
    buckets = next;
  }

  stages
}
