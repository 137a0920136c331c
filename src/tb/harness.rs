//! 一次完整的 harness 运行
//!
//! 建立三条队列（激励、期望、输出），组装各组件与被测引擎，跑完仿真后返回报告
//! 或致命错误。

use super::driver::Driver;
use super::generator::Generator;
use super::monitor::{Monitor, MonitorTick};
use super::report::RunReport;
use super::scoreboard::Scoreboard;
use super::sequencer::{Sequencer, SequencerOpts, SequencerResume};
use super::world::{ClockEdge, TbWorld};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::eut::Engine;
use crate::sim::{SimTime, Simulator};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::mpsc;
use tracing::info;

/// driver 抖动随机流与生成器随机流分开，二者都由同一个种子派生
const JITTER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// 组装 testbench 世界并安排初始事件
pub fn build(cfg: &HarnessConfig, eut: Box<dyn Engine>, sim: &mut Simulator) -> TbWorld {
    let (stim_tx, stim_rx) = mpsc::channel();
    let (expect_tx, expect_rx) = mpsc::channel();
    let (out_tx, out_rx) = mpsc::channel();

    let driver = Driver::new(
        stim_rx,
        StdRng::seed_from_u64(cfg.seed ^ JITTER_SEED_SALT),
        cfg.max_jitter,
    );
    let monitor = Monitor::new(out_tx);
    let scoreboard = Scoreboard::new(out_rx, expect_rx);
    let sequencer = Sequencer::new(
        Generator::seeded(cfg.seed, cfg.error_rate),
        stim_tx,
        expect_tx,
        SequencerOpts {
            packets: cfg.packets,
            reset_ticks: cfg.reset_ticks,
            drain_ticks: cfg.drain_ticks,
        },
    );

    // 时钟与监视器先于序列启动
    sim.schedule(SimTime::ZERO, ClockEdge);
    sim.schedule(SimTime::ZERO, MonitorTick);
    sim.schedule(SimTime::ZERO, SequencerResume);

    TbWorld::new(eut, driver, monitor, scoreboard, sequencer, cfg.seed)
}

/// 运行一次 harness
pub fn run(cfg: &HarnessConfig, eut: Box<dyn Engine>) -> Result<RunReport, HarnessError> {
    cfg.validate()?;
    info!(
        engine = eut.name(),
        seed = cfg.seed,
        packets = cfg.packets,
        error_rate = cfg.error_rate,
        "🚦 harness 启动"
    );

    let mut sim = Simulator::default();
    let mut world = build(cfg, eut, &mut sim);
    sim.run(&mut world);

    world.take_outcome().ok_or(HarnessError::Incomplete {
        tick: sim.now(),
    })?
}
