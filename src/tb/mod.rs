//! testbench 组件
//!
//! 参考模型之外的全部验证组件：激励生成、驱动、监视、计分、覆盖率与编排。

mod coverage;
mod driver;
mod generator;
mod harness;
mod monitor;
mod report;
mod scoreboard;
mod sequencer;
mod world;

pub use coverage::{Coverage, CoverageReport};
pub use driver::{DriveAssert, DriveRelease, Driver};
pub use generator::Generator;
pub use harness::{build, run};
pub use monitor::{Monitor, MonitorTick};
pub use report::RunReport;
pub use scoreboard::{Outcome, ScoreStats, Scoreboard, ScoreboardWake, TraceEntry, render_trace};
pub use sequencer::{
    Finish, ResetAssert, ResetRelease, Sequencer, SequencerOpts, SequencerResume, StimulusRecord,
    verdict,
};
pub use world::{ClockEdge, TbWorld};
