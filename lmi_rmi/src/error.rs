//! RMI errors / RMI 错误

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("stage_sizes must not be empty")]
  EmptyStages,

  #[error("stage_sizes[0] must be 1 (got {provided})")]
  RootWidth { provided: usize },

  #[error("stage_sizes[{stage}] must be positive")]
  StageWidth { stage: usize },

  #[error("error_threshold must be positive (got {provided})")]
  Threshold { provided: f64 },
}
