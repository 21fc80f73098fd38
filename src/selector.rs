// ============================================
// src/selector.rs
// お題をランダムに選ぶ
// ============================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::word_bank::WordEntry;

/// 乱数源を持ったお題セレクタ
pub struct WordSelector<R: Rng = StdRng> {
    rng: R,
}

impl WordSelector<StdRng> {
    /// シードがあれば再現可能に、なければOSの乱数で初期化する
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> WordSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `[0, len)` から一様に1つ選ぶ (空なら None)
    pub fn select<'a>(&mut self, bank: &'a [WordEntry]) -> Option<&'a WordEntry> {
        if bank.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..bank.len());
        bank.get(index)
    }
}
