//! Sorted key store / 有序键存储

use std::mem::size_of;

/// Owns the globally sorted keys; answers bounded rank queries only.
/// No unbounded search is exposed to the engine.
/// 持有全局有序键；仅回答有界排名查询，不暴露无界查找。
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Debug, Default)]
pub struct SortedKeys {
  keys: Vec<f64>,
}

impl SortedKeys {
  /// Wrap an ascending key array
  /// 包装升序键数组
  #[must_use]
  pub fn new(keys: Vec<f64>) -> Self {
    debug_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    Self { keys }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.keys.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[f64] {
    &self.keys
  }

  /// Key at rank `i` / 排名 i 处的键
  #[inline]
  #[must_use]
  pub fn key(&self, i: u64) -> f64 {
    self.keys[i as usize]
  }

  /// Smallest index in `[lo, hi)` whose key is `>= key`; `hi` if none
  /// `[lo, hi)` 中首个键 `>= key` 的下标；不存在则为 `hi`
  #[inline]
  #[must_use]
  pub fn lower_bound(&self, key: f64, lo: u64, hi: u64) -> u64 {
    let mut lo = lo as usize;
    let mut hi = (hi as usize).min(self.keys.len());

    // Half-open midpoint loop; the tiny branch body compiles to
    // conditional moves
    // 半开区间中点循环；微小分支体编译为条件移动
    while lo < hi {
      let mid = lo + (hi - lo) / 2;
      // SAFETY: mid < hi <= keys.len()
      if unsafe { *self.keys.get_unchecked(mid) } < key {
        lo = mid + 1;
      } else {
        hi = mid;
      }
    }
    lo as u64
  }

  /// Bytes owned by the key array / 键数组占用字节
  #[inline]
  #[must_use]
  pub fn mem_usage(&self) -> usize {
    self.keys.len() * size_of::<f64>()
  }
}
