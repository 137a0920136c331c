//! testbench 世界
//!
//! 持有被测引擎、引脚电平和全部 testbench 组件；时钟沿事件在这里。

use super::driver::Driver;
use super::monitor::Monitor;
use super::report::RunReport;
use super::scoreboard::Scoreboard;
use super::sequencer::{Sequencer, verdict};
use crate::error::HarnessError;
use crate::eut::{Engine, EutInputs, EutOutputs};
use crate::proto::Sym;
use crate::sim::{Event, Phase, SimTime, Simulator, World};
use std::any::Any;
use tracing::{error, info, trace, warn};

pub struct TbWorld {
    pub eut: Box<dyn Engine>,
    /// 当前驱动到被测引擎上的输入电平
    pub pins: EutInputs,
    /// 最近一个时钟沿寄存的输出
    pub outputs: EutOutputs,
    pub driver: Driver,
    pub monitor: Monitor,
    pub scoreboard: Scoreboard,
    pub sequencer: Sequencer,
    seed: u64,
    finished: bool,
    outcome: Option<Result<RunReport, HarnessError>>,
}

impl TbWorld {
    pub fn new(
        eut: Box<dyn Engine>,
        driver: Driver,
        monitor: Monitor,
        scoreboard: Scoreboard,
        sequencer: Sequencer,
        seed: u64,
    ) -> Self {
        Self {
            eut,
            pins: EutInputs::default(),
            outputs: EutOutputs::default(),
            driver,
            monitor,
            scoreboard,
            sequencer,
            seed,
            finished: false,
            outcome: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn take_outcome(&mut self) -> Option<Result<RunReport, HarnessError>> {
        self.outcome.take()
    }

    /// 收尾：消费剩余输出、汇总报告，然后做最终状态判定
    pub(crate) fn finish(&mut self, now: SimTime, events: u64) {
        self.finished = true;
        self.scoreboard.drain();
        let missing = self.scoreboard.take_missing();
        let stats = self.scoreboard.stats();
        let coverage = self.sequencer.coverage().report();

        info!(
            total = stats.total,
            pass = stats.pass,
            fail = stats.fail,
            missing = missing.len(),
            checksum_errors = self.sequencer.checksum_errors(),
            state_transitions = self.sequencer.state_transitions(),
            input_cov = coverage.input_percent,
            transition_cov = coverage.transition_percent,
            "📊 运行统计"
        );
        for m in &missing {
            warn!(expected = %Sym(*m), "期望的输出始终没有出现");
        }

        let outcome = verdict(
            self.monitor.last_state(),
            self.sequencer.ended_after_reset(),
            now,
        )
        .map(|final_state| RunReport {
            engine: self.eut.name().to_string(),
            seed: self.seed,
            ticks: now.0,
            events,
            stimuli: self.sequencer.issued(),
            outputs: self.monitor.captured(),
            jitter_ticks: self.driver.jitter_total(),
            checksum_errors: self.sequencer.checksum_errors(),
            state_transitions: self.sequencer.state_transitions(),
            stats,
            missing,
            coverage,
            final_state,
            trace: self.scoreboard.trace().to_vec(),
            history: self.sequencer.history().to_vec(),
        });

        match &outcome {
            Ok(r) => info!(final_state = %r.final_state, "✅ 最终状态判定通过"),
            Err(e) => error!(error = %e, "💥 最终状态判定失败，中止运行"),
        }
        self.outcome = Some(outcome);
    }
}

impl World for TbWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// 把事件拿到的 `World` 还原为 `TbWorld`
pub(crate) fn tb_world(world: &mut dyn World) -> &mut TbWorld {
    world
        .as_any_mut()
        .downcast_mut::<TbWorld>()
        .expect("world must be TbWorld")
}

/// 事件：时钟上升沿，被测引擎锁存输入
#[derive(Debug)]
pub struct ClockEdge;

impl Event for ClockEdge {
    fn phase(&self) -> Phase {
        Phase::Edge
    }

    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = tb_world(world);
        let pins = w.pins;
        w.outputs = w.eut.clock(&pins);
        trace!(now = ?sim.now(), ?pins, outputs = ?w.outputs, "时钟沿");
        if !w.finished {
            sim.schedule_in(1, ClockEdge);
        }
    }
}
