//! 有序计分板
//!
//! 按到达顺序消费监视器的输出队列，与 sequencer 填充的期望队列逐项比较。
//! 统计与追踪记录都归本实例所有，多次运行之间互不干扰。

use super::world::tb_world;
use crate::proto::Sym;
use crate::sim::{Event, Phase, Simulator, World};
use serde::Serialize;
use std::sync::mpsc::Receiver;
use tracing::{debug, warn};

/// 一条输出的比较结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Match,
    /// 与同一 FIFO 位置上的期望不符
    Mismatch,
    /// 到达时没有待匹配的期望
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub index: u64,
    pub actual: u8,
    pub expected: Option<u8>,
    pub outcome: Outcome,
}

impl TraceEntry {
    pub fn is_match(&self) -> bool {
        self.outcome == Outcome::Match
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreStats {
    pub total: u64,
    pub pass: u64,
    pub fail: u64,
    pub mismatched: u64,
    pub unexpected: u64,
}

#[derive(Debug)]
pub struct Scoreboard {
    outputs: Receiver<u8>,
    expected: Receiver<u8>,
    stats: ScoreStats,
    trace: Vec<TraceEntry>,
}

impl Scoreboard {
    pub fn new(outputs: Receiver<u8>, expected: Receiver<u8>) -> Self {
        Self {
            outputs,
            expected,
            stats: ScoreStats::default(),
            trace: Vec::new(),
        }
    }

    /// 消费输出队列中已到达的全部符号；返回处理条数
    pub fn drain(&mut self) -> usize {
        let mut n = 0;
        while let Ok(actual) = self.outputs.try_recv() {
            self.check(actual);
            n += 1;
        }
        n
    }

    /// 比较一条实际输出
    pub fn check(&mut self, actual: u8) -> Outcome {
        let index = self.stats.total;
        let expected = self.expected.try_recv().ok();
        let outcome = match expected {
            Some(exp) if exp == actual => Outcome::Match,
            Some(_) => Outcome::Mismatch,
            None => Outcome::Unexpected,
        };

        self.stats.total += 1;
        match outcome {
            Outcome::Match => self.stats.pass += 1,
            Outcome::Mismatch => {
                self.stats.fail += 1;
                self.stats.mismatched += 1;
                warn!(
                    index,
                    actual = %Sym(actual),
                    expected = %Sym(expected.unwrap_or_default()),
                    "输出与期望不符"
                );
            }
            Outcome::Unexpected => {
                self.stats.fail += 1;
                self.stats.unexpected += 1;
                warn!(index, actual = %Sym(actual), "没有对应期望的意外输出");
            }
        }
        debug!(index, actual = %Sym(actual), ?outcome, "scoreboard 比较");

        self.trace.push(TraceEntry {
            index,
            actual,
            expected,
            outcome,
        });
        outcome
    }

    /// 取走所有尚未被输出匹配的期望（运行结束时调用）
    pub fn take_missing(&mut self) -> Vec<u8> {
        self.expected.try_iter().collect()
    }

    pub fn stats(&self) -> ScoreStats {
        self.stats
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn trace_table(&self) -> String {
        render_trace(&self.trace)
    }
}

/// 渲染 `index | actual | match` 表
pub fn render_trace(trace: &[TraceEntry]) -> String {
    let mut out = String::from("index | actual | match\n");
    out.push_str("------+--------+------\n");
    for e in trace {
        out.push_str(&format!(
            "{:>5} | {:<6} | {}\n",
            e.index,
            Sym(e.actual).to_string(),
            if e.is_match() { "yes" } else { "no" }
        ));
    }
    out
}

/// 事件：输出队列有新数据
#[derive(Debug)]
pub struct ScoreboardWake;

impl Event for ScoreboardWake {
    fn phase(&self) -> Phase {
        Phase::Check
    }

    fn execute(self: Box<Self>, _sim: &mut Simulator, world: &mut dyn World) {
        tb_world(world).scoreboard.drain();
    }
}
