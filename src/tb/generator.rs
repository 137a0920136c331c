//! 约束随机激励生成器
//!
//! flag 在 {0,1,2,3} 中均匀抽取：1→'S'，2→'K'，3→'Z'（噪声），0→在 {'X','Y'} 中均匀抽取；
//! 再以 `error_rate` 的概率把校验和破坏成 `symbol ^ 0xAA`。
//! 随机源由调用方注入，固定种子即可复现同一序列。

use crate::proto::{ACK, MISC, NOISE, Packet, SYN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct Generator<R = StdRng> {
    rng: R,
    error_rate: f64,
    produced: u64,
}

impl Generator<StdRng> {
    /// 用固定种子构造
    pub fn seeded(seed: u64, error_rate: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), error_rate)
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R, error_rate: f64) -> Self {
        let error_rate = if error_rate.is_nan() {
            0.0
        } else {
            error_rate.clamp(0.0, 1.0)
        };
        Self {
            rng,
            error_rate,
            produced: 0,
        }
    }

    pub fn produced(&self) -> u64 {
        self.produced
    }

    pub fn next_packet(&mut self) -> Packet {
        let flag: u8 = self.rng.gen_range(0..4);
        let symbol = match flag {
            1 => SYN,
            2 => ACK,
            3 => NOISE,
            _ => MISC[self.rng.gen_range(0..MISC.len())],
        };
        self.produced += 1;
        if self.rng.gen_bool(self.error_rate) {
            Packet::corrupted(symbol)
        } else {
            Packet::valid(symbol)
        }
    }
}

impl<R: Rng> Iterator for Generator<R> {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        Some(self.next_packet())
    }
}
