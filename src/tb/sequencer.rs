//! 测试序列
//!
//! 一次运行的编排：
//! 1. A 阶段：脚本化握手（Idle 时发 'S'，随后 SynReceived 时发 'K'）
//! 2. 复位：保持若干 tick 后释放，参考模型同步回到 Idle
//! 3. B 阶段：再做一次脚本化握手
//! 4. C 阶段：N 个约束随机包
//! 5. 排空等待后汇总并做最终状态判定
//!
//! sequencer 与 driver 构成一条顺序控制流：每次只发一个包，driver 撤销输入后才会
//! 通过 `SequencerResume` 继续。

use super::coverage::Coverage;
use super::driver::Driver;
use super::generator::Generator;
use super::world::tb_world;
use crate::error::HarnessError;
use crate::proto::{
    ACK, InputClass, Packet, ProtocolState, ReferenceModel, ResponseKind, SYN, Sym, TransitionEdge,
};
use crate::sim::{Event, Phase, SimTime, Simulator, World};
use serde::Serialize;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

/// 脚本化握手的两步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptStep {
    Syn,
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    PreReset(ScriptStep),
    Reset,
    PostReset(ScriptStep),
    Random { remaining: u64 },
    Drain,
    Done,
}

/// 一个激励的完整记录：包、oracle 的转移与期望响应
///
/// `index` 与 scoreboard 追踪表的 `index` 一一对应（没有意外输出时）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StimulusRecord {
    pub index: u64,
    /// 交给 driver 时的仿真时间
    pub issued_at: u64,
    pub symbol: u8,
    pub checksum: u8,
    pub class: InputClass,
    pub checksum_valid: bool,
    pub state_before: ProtocolState,
    pub state_after: ProtocolState,
    pub edge: Option<TransitionEdge>,
    pub expected: u8,
    pub response: ResponseKind,
}

/// sequencer 的可调参数
#[derive(Debug, Clone, Copy)]
pub struct SequencerOpts {
    pub packets: u64,
    pub reset_ticks: u64,
    pub drain_ticks: u64,
}

#[derive(Debug)]
pub struct Sequencer {
    stage: Stage,
    opts: SequencerOpts,
    oracle: ReferenceModel,
    generator: Generator,
    coverage: Coverage,
    stim_tx: Sender<Packet>,
    expect_tx: Sender<u8>,
    issued: u64,
    issued_since_reset: u64,
    checksum_errors: u64,
    state_transitions: u64,
    history: Vec<StimulusRecord>,
}

impl Sequencer {
    pub fn new(
        generator: Generator,
        stim_tx: Sender<Packet>,
        expect_tx: Sender<u8>,
        opts: SequencerOpts,
    ) -> Self {
        Self {
            stage: Stage::PreReset(ScriptStep::Syn),
            opts: SequencerOpts {
                reset_ticks: opts.reset_ticks.max(1),
                ..opts
            },
            oracle: ReferenceModel::new(),
            generator,
            coverage: Coverage::new(),
            stim_tx,
            expect_tx,
            issued: 0,
            issued_since_reset: 0,
            checksum_errors: 0,
            state_transitions: 0,
            history: Vec::new(),
        }
    }

    pub fn oracle_state(&self) -> ProtocolState {
        self.oracle.state()
    }

    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// 已发出的激励数（每个激励恰好对应一条期望）
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// oracle 判定为校验失败的激励数
    pub fn checksum_errors(&self) -> u64 {
        self.checksum_errors
    }

    /// oracle 发生状态变化的次数（复位不计）
    pub fn state_transitions(&self) -> u64 {
        self.state_transitions
    }

    pub fn history(&self) -> &[StimulusRecord] {
        &self.history
    }

    /// 运行是否在一次复位之后、未再发任何激励时结束
    pub fn ended_after_reset(&self) -> bool {
        self.coverage.resets() > 0 && self.issued_since_reset == 0
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// 推进编排直到发出一个激励、安排了复位/收尾，或已经结束
    pub fn resume(&mut self, sim: &mut Simulator, driver: &mut Driver) {
        loop {
            match self.stage {
                Stage::PreReset(step) | Stage::PostReset(step) => {
                    let pre = matches!(self.stage, Stage::PreReset(_));
                    let (pkt, next) = self.script(step);
                    self.stage = match (next, pre) {
                        (Some(s), true) => Stage::PreReset(s),
                        (Some(s), false) => Stage::PostReset(s),
                        (None, true) => Stage::Reset,
                        (None, false) => Stage::Random {
                            remaining: self.opts.packets,
                        },
                    };
                    if let Some(pkt) = pkt {
                        self.issue(pkt, sim, driver);
                        return;
                    }
                }
                Stage::Reset => {
                    info!(at = ?sim.now(), ticks = self.opts.reset_ticks, "🔁 注入复位");
                    self.stage = Stage::PostReset(ScriptStep::Syn);
                    sim.schedule_in(
                        1,
                        ResetAssert {
                            hold: self.opts.reset_ticks,
                        },
                    );
                    return;
                }
                Stage::Random { remaining: 0 } => {
                    self.stage = Stage::Drain;
                }
                Stage::Random { remaining } => {
                    self.stage = Stage::Random {
                        remaining: remaining - 1,
                    };
                    let pkt = self.generator.next_packet();
                    self.issue(pkt, sim, driver);
                    return;
                }
                Stage::Drain => {
                    info!(
                        at = ?sim.now(),
                        drain_ticks = self.opts.drain_ticks,
                        issued = self.issued,
                        "⏳ 激励发送完毕，等待输出排空"
                    );
                    self.stage = Stage::Done;
                    sim.schedule_in(self.opts.drain_ticks, Finish);
                    return;
                }
                Stage::Done => return,
            }
        }
    }

    /// 脚本化握手的一步：返回（要发的包, 下一步）
    fn script(&self, step: ScriptStep) -> (Option<Packet>, Option<ScriptStep>) {
        match step {
            ScriptStep::Syn => {
                let pkt = (self.oracle.state() == ProtocolState::Idle).then(|| Packet::valid(SYN));
                (pkt, Some(ScriptStep::Ack))
            }
            ScriptStep::Ack => {
                let pkt = (self.oracle.state() == ProtocolState::SynReceived)
                    .then(|| Packet::valid(ACK));
                (pkt, None)
            }
        }
    }

    /// 参考模型预测 → 覆盖率采样 → 期望入队 → 交给 driver
    fn issue(&mut self, pkt: Packet, sim: &mut Simulator, driver: &mut Driver) {
        let tr = self.oracle.apply(&pkt);
        self.coverage.sample(&pkt, &tr);
        match tr.response {
            ResponseKind::Error => self.checksum_errors += 1,
            r if r.is_state_transition() => self.state_transitions += 1,
            _ => {}
        }
        self.history.push(StimulusRecord {
            index: self.issued,
            issued_at: sim.now().0,
            symbol: pkt.symbol(),
            checksum: pkt.checksum(),
            class: pkt.class(),
            checksum_valid: pkt.has_valid_checksum(),
            state_before: tr.from,
            state_after: tr.to,
            edge: tr.edge(),
            expected: tr.output,
            response: tr.response,
        });
        if self.expect_tx.send(tr.output).is_err() {
            warn!(%pkt, "期望队列已关闭");
        }
        if self.stim_tx.send(pkt).is_err() {
            warn!(%pkt, "激励队列已关闭");
        }
        self.issued += 1;
        self.issued_since_reset += 1;
        debug!(
            %pkt,
            from = %tr.from,
            to = %tr.to,
            expected = %Sym(tr.output),
            response = ?tr.response,
            "发出激励"
        );
        driver.pump(sim);
    }

    fn apply_reset(&mut self) {
        self.oracle.reset();
        self.coverage.record_reset();
        self.issued_since_reset = 0;
    }
}

/// 最终状态判定
///
/// 观测到的最终状态必须是 AckReceived；Idle 只有在运行恰好结束于一次复位之后才算通过。
pub fn verdict(
    raw_state: u8,
    ended_after_reset: bool,
    tick: SimTime,
) -> Result<ProtocolState, HarnessError> {
    let state =
        ProtocolState::from_bits(raw_state).ok_or(HarnessError::UnknownState { raw: raw_state })?;
    match state {
        ProtocolState::AckReceived => Ok(state),
        ProtocolState::Idle if ended_after_reset => Ok(state),
        _ => Err(HarnessError::ProtocolStuck { state, tick }),
    }
}

/// 事件：让 sequencer 继续下一步
#[derive(Debug)]
pub struct SequencerResume;

impl Event for SequencerResume {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = tb_world(world);
        w.sequencer.resume(sim, &mut w.driver);
    }
}

/// 事件：拉高复位并保持 `hold` 个 tick；参考模型在此刻同步复位
#[derive(Debug)]
pub struct ResetAssert {
    pub hold: u64,
}

impl Event for ResetAssert {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = tb_world(world);
        w.pins.rst = true;
        w.sequencer.apply_reset();
        debug!(now = ?sim.now(), hold = self.hold, "rst 拉高");
        sim.schedule_in(self.hold, ResetRelease);
    }
}

/// 事件：释放复位并继续序列
#[derive(Debug)]
pub struct ResetRelease;

impl Event for ResetRelease {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = tb_world(world);
        w.pins.rst = false;
        debug!(now = ?sim.now(), "rst 释放");
        sim.schedule_in(0, SequencerResume);
    }
}

/// 事件：排空结束，汇总并判定
#[derive(Debug)]
pub struct Finish;

impl Event for Finish {
    fn phase(&self) -> Phase {
        Phase::Check
    }

    #[tracing::instrument(skip(self, sim, world))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let now = sim.now();
        let events = sim.executed();
        tb_world(world).finish(now, events);
    }
}
