//! 参考模型（oracle）
//!
//! 握手协议的唯一一份转移规则：`step` 是纯函数，`ReferenceModel` 只负责持有当前状态
//! 并处理带外复位。它从不查询被测引擎的输出。

use super::packet::{ACK, COMPLETE, ERROR, Packet, SYN, SYN_ACK};
use super::state::ProtocolState;
use serde::Serialize;

/// 单步转移结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: ProtocolState,
    pub output: u8,
}

/// 状态 × 包 → (下一状态, 期望输出)
///
/// 校验和检查优先于一切状态逻辑：校验失败时输出 `'E'`，状态不变。
pub fn step(state: ProtocolState, pkt: &Packet) -> Step {
    if !pkt.has_valid_checksum() {
        return Step {
            next: state,
            output: ERROR,
        };
    }

    let symbol = pkt.symbol();
    match (state, symbol) {
        (ProtocolState::Idle, SYN) => Step {
            next: ProtocolState::SynReceived,
            output: SYN_ACK,
        },
        (ProtocolState::SynReceived, ACK) => Step {
            next: ProtocolState::AckReceived,
            output: COMPLETE,
        },
        // 其余组合：回显，状态保持（AckReceived 为终态）
        (state, symbol) => Step {
            next: state,
            output: symbol,
        },
    }
}

/// 覆盖率关心的两条状态边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEdge {
    IdleToSynReceived,
    SynReceivedToAckReceived,
}

impl TransitionEdge {
    pub const ALL: [TransitionEdge; 2] = [
        TransitionEdge::IdleToSynReceived,
        TransitionEdge::SynReceivedToAckReceived,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransitionEdge::IdleToSynReceived => "idle_to_syn",
            TransitionEdge::SynReceivedToAckReceived => "syn_to_ack",
        }
    }
}

/// oracle 对一个包给出的响应类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// 校验失败，输出 `'E'`
    Error,
    /// Idle 收到 SYN
    SynAck,
    /// SynReceived 收到 ACK
    AckComplete,
    /// 握手未完成时的回显
    Echo,
    /// 握手完成之后的回显
    DataTransfer,
}

impl ResponseKind {
    pub fn classify(checksum_valid: bool, from: ProtocolState, to: ProtocolState) -> Self {
        if !checksum_valid {
            return ResponseKind::Error;
        }
        match (from, to) {
            (ProtocolState::Idle, ProtocolState::SynReceived) => ResponseKind::SynAck,
            (ProtocolState::SynReceived, ProtocolState::AckReceived) => ResponseKind::AckComplete,
            (ProtocolState::AckReceived, _) => ResponseKind::DataTransfer,
            _ => ResponseKind::Echo,
        }
    }

    /// 本响应是否伴随一次状态变化
    pub fn is_state_transition(self) -> bool {
        matches!(self, ResponseKind::SynAck | ResponseKind::AckComplete)
    }
}

/// 一次 `apply` 的完整记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ProtocolState,
    pub to: ProtocolState,
    pub output: u8,
    pub response: ResponseKind,
}

impl Transition {
    /// 若 from→to 是已定义的状态边则返回它
    pub fn edge(&self) -> Option<TransitionEdge> {
        match (self.from, self.to) {
            (ProtocolState::Idle, ProtocolState::SynReceived) => {
                Some(TransitionEdge::IdleToSynReceived)
            }
            (ProtocolState::SynReceived, ProtocolState::AckReceived) => {
                Some(TransitionEdge::SynReceivedToAckReceived)
            }
            _ => None,
        }
    }
}

/// 持有 oracle 当前状态的参考模型
#[derive(Debug, Clone, Default)]
pub struct ReferenceModel {
    state: ProtocolState,
}

impl ReferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// 推进一个包，返回转移记录（含期望输出）
    pub fn apply(&mut self, pkt: &Packet) -> Transition {
        let from = self.state;
        let Step { next, output } = step(from, pkt);
        self.state = next;
        Transition {
            from,
            to: next,
            output,
            response: ResponseKind::classify(pkt.has_valid_checksum(), from, next),
        }
    }

    /// 带外复位：同步回到 Idle，不产生输出
    pub fn reset(&mut self) {
        self.state = ProtocolState::Idle;
    }
}
