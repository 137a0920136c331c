//! 输出监视器
//!
//! 每个 tick 在时钟沿之后采样被测引擎输出；`out_valid` 有效时把符号按到达顺序
//! 推入无界输出队列并唤醒 scoreboard。与 driver 的节奏无关，贯穿整次运行。

use super::scoreboard::ScoreboardWake;
use super::world::tb_world;
use crate::eut::EutOutputs;
use crate::proto::Sym;
use crate::sim::{Event, Phase, Simulator, World};
use std::sync::mpsc::Sender;
use tracing::{trace, warn};

#[derive(Debug)]
pub struct Monitor {
    tx: Sender<u8>,
    captured: u64,
    last_state: u8,
}

impl Monitor {
    pub fn new(tx: Sender<u8>) -> Self {
        Self {
            tx,
            captured: 0,
            last_state: 0,
        }
    }

    /// 采样一次输出；返回本次是否有符号入队
    pub fn sample(&mut self, out: &EutOutputs) -> bool {
        self.last_state = out.state;
        if !out.out_valid {
            return false;
        }
        if self.tx.send(out.data).is_err() {
            warn!(data = %Sym(out.data), "输出队列已关闭，符号未能入队");
            return false;
        }
        self.captured += 1;
        true
    }

    pub fn captured(&self) -> u64 {
        self.captured
    }

    /// 最近一次观测到的 2-bit 状态指示
    pub fn last_state(&self) -> u8 {
        self.last_state
    }
}

/// 事件：每个 tick 的采样
#[derive(Debug)]
pub struct MonitorTick;

impl Event for MonitorTick {
    fn phase(&self) -> Phase {
        Phase::Sample
    }

    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = tb_world(world);
        let out = w.outputs;
        if w.monitor.sample(&out) {
            trace!(now = ?sim.now(), data = %Sym(out.data), state = out.state, "monitor 捕获输出");
            sim.schedule_in(0, ScoreboardWake);
        }
        if !w.is_finished() {
            sim.schedule_in(1, MonitorTick);
        }
    }
}
