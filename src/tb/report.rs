//! 运行报告
//!
//! 汇总统计、覆盖率与追踪表；可序列化为 JSON，也可渲染为文本摘要。

use super::coverage::CoverageReport;
use super::scoreboard::{ScoreStats, TraceEntry, render_trace};
use super::sequencer::StimulusRecord;
use crate::proto::{ProtocolState, Sym};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub engine: String,
    pub seed: u64,
    /// 收尾时的仿真时间（tick）
    pub ticks: u64,
    /// 执行过的事件数
    pub events: u64,
    /// 发出的激励数
    pub stimuli: u64,
    /// monitor 捕获的输出数
    pub outputs: u64,
    /// driver 累计插入的抖动 tick 数
    pub jitter_ticks: u64,
    /// oracle 判定为校验失败的激励数
    pub checksum_errors: u64,
    /// oracle 的状态变化次数
    pub state_transitions: u64,
    pub stats: ScoreStats,
    /// 直到结束都没有等到输出的期望
    pub missing: Vec<u8>,
    pub coverage: CoverageReport,
    pub final_state: ProtocolState,
    pub trace: Vec<TraceEntry>,
    /// 每个激励一条，按发出顺序
    pub history: Vec<StimulusRecord>,
}

impl RunReport {
    /// 没有任何失败，且每条期望都等到了输出
    pub fn is_clean(&self) -> bool {
        self.stats.fail == 0 && self.missing.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "engine={} seed={} ticks={} stimuli={}",
                self.engine, self.seed, self.ticks, self.stimuli
            ),
            format!(
                "total={} pass={} fail={} (mismatch={} unexpected={} missing={})",
                self.stats.total,
                self.stats.pass,
                self.stats.fail,
                self.stats.mismatched,
                self.stats.unexpected,
                self.missing.len()
            ),
            format!(
                "checksum_errors={} state_transitions={} jitter_ticks={}",
                self.checksum_errors, self.state_transitions, self.jitter_ticks
            ),
            format!(
                "coverage: input={:.1}% transition={:.1}%",
                self.coverage.input_percent, self.coverage.transition_percent
            ),
        ];
        if !self.missing.is_empty() {
            let syms = self
                .missing
                .iter()
                .map(|s| Sym(*s).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("missing: {syms}"));
        }
        lines.push(format!("final_state={}", self.final_state));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    pub fn trace_table(&self) -> String {
        render_trace(&self.trace)
    }
}
