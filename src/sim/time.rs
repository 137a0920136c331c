//! 仿真时间类型
//!
//! 以时钟沿计数的离散时间，以及同一时钟沿内的事件相位。

/// 仿真时间（时钟沿序号）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 当前时间之后 `ticks` 个时钟沿
    pub fn after(self, ticks: u64) -> SimTime {
        SimTime(self.0.saturating_add(ticks))
    }

    /// 两个时间点之间相差的时钟沿数（不足为 0）
    pub fn ticks_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// 同一 tick 内的执行相位，按声明顺序先后执行。
///
/// - `Drive`：激励侧改写输入引脚（driver、复位、sequencer 续跑）
/// - `Edge`：时钟上升沿，被测引擎锁存输入并更新寄存器输出
/// - `Sample`：monitor 采样沿后稳定的输出
/// - `Check`：scoreboard 消费输出队列、收尾与判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum Phase {
    #[default]
    Drive,
    Edge,
    Sample,
    Check,
}
