//! 符合协议的引擎模型
//!
//! 按寄存器级写法独立实现（2-bit 状态寄存器 + 输出寄存器），不复用 oracle 的转移函数。

use super::{Engine, EutInputs, EutOutputs};

const ST_IDLE: u8 = 0;
const ST_SYN: u8 = 1;
const ST_ACK: u8 = 2;

#[derive(Debug, Default)]
pub struct HandshakeEngine {
    state: u8,
    out: EutOutputs,
}

impl HandshakeEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for HandshakeEngine {
    fn clock(&mut self, i: &EutInputs) -> EutOutputs {
        if i.rst {
            self.state = ST_IDLE;
            self.out = EutOutputs::default();
            return self.out;
        }

        self.out.out_valid = false;
        if i.in_valid {
            // data ^ checksum 必须恰为全 1
            let (data, next) = if i.data ^ i.checksum != 0xFF {
                (b'E', self.state)
            } else {
                match (self.state, i.data) {
                    (ST_IDLE, b'S') => (b'A', ST_SYN),
                    (ST_SYN, b'K') => (b'C', ST_ACK),
                    (st, d) => (d, st),
                }
            };
            self.state = next;
            self.out.data = data;
            self.out.out_valid = true;
        }
        self.out.state = self.state;
        self.out
    }

    fn name(&self) -> &'static str {
        "handshake"
    }
}
