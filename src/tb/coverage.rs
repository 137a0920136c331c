//! 覆盖率统计
//!
//! 输入类别分箱 {syn, ack, noise, misc} 与状态边分箱 {Idle→SynReceived, SynReceived→AckReceived}。
//! 计数只增不减；覆盖率 = 命中箱数 / 定义箱数 × 100。

use crate::proto::{InputClass, Packet, Transition, TransitionEdge};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Coverage {
    inputs: [u64; InputClass::ALL.len()],
    transitions: [u64; TransitionEdge::ALL.len()],
    resets: u64,
    samples: u64,
}

/// 覆盖率快照（写入报告）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub inputs: BTreeMap<&'static str, u64>,
    pub transitions: BTreeMap<&'static str, u64>,
    pub resets: u64,
    pub input_percent: f64,
    pub transition_percent: f64,
}

fn percent(bins: &[u64]) -> f64 {
    if bins.is_empty() {
        return 0.0;
    }
    let hit = bins.iter().filter(|&&n| n > 0).count();
    hit as f64 * 100.0 / bins.len() as f64
}

impl Coverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 对刚生成的包及其在参考模型上的转移采样
    pub fn sample(&mut self, pkt: &Packet, tr: &Transition) {
        self.samples += 1;
        self.inputs[pkt.class() as usize] += 1;
        if let Some(edge) = tr.edge() {
            self.transitions[edge as usize] += 1;
        }
    }

    pub fn record_reset(&mut self) {
        self.resets += 1;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn input_hits(&self, class: InputClass) -> u64 {
        self.inputs[class as usize]
    }

    pub fn transition_hits(&self, edge: TransitionEdge) -> u64 {
        self.transitions[edge as usize]
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn input_percent(&self) -> f64 {
        percent(&self.inputs)
    }

    pub fn transition_percent(&self) -> f64 {
        percent(&self.transitions)
    }

    pub fn report(&self) -> CoverageReport {
        CoverageReport {
            inputs: InputClass::ALL
                .iter()
                .map(|c| (c.name(), self.input_hits(*c)))
                .collect(),
            transitions: TransitionEdge::ALL
                .iter()
                .map(|e| (e.name(), self.transition_hits(*e)))
                .collect(),
            resets: self.resets,
            input_percent: self.input_percent(),
            transition_percent: self.transition_percent(),
        }
    }
}
