//! 被测引擎（EUT）边界
//!
//! testbench 只通过引脚级接口与被测引擎交互：每个时钟沿给出一组输入电平，
//! 取回沿后寄存的输出。这里同时提供一个符合协议的引擎模型和若干故障模型，
//! 便于在没有真实硬件的情况下运行与自测 harness。

mod faulty;
mod handshake;

pub use faulty::{Fault, FaultyEngine};
pub use handshake::HandshakeEngine;

/// 某个时钟沿采样到的输入电平
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EutInputs {
    /// 同步、电平有效的复位
    pub rst: bool,
    pub data: u8,
    pub checksum: u8,
    pub in_valid: bool,
}

/// 时钟沿之后寄存的输出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EutOutputs {
    pub data: u8,
    pub out_valid: bool,
    /// 2-bit 状态指示：Idle=0, SynReceived=1, AckReceived=2（仅供白盒观测）
    pub state: u8,
}

/// 被测引擎接口
pub trait Engine {
    /// 一个时钟上升沿：锁存 `inputs`，返回新的寄存输出。
    ///
    /// `in_valid` 在沿上被采样时，返回值必须带 `out_valid` 与对应输出符号；
    /// `rst` 为高时状态回到 Idle 且输出清零。
    fn clock(&mut self, inputs: &EutInputs) -> EutOutputs;

    fn name(&self) -> &'static str;
}

/// 按故障选择引擎；`None` 为符合协议的引擎
pub fn engine_for(fault: Option<Fault>) -> Box<dyn Engine> {
    match fault {
        Some(f) => Box::new(FaultyEngine::new(f)),
        None => Box::new(HandshakeEngine::new()),
    }
}
