//! 协议状态
//!
//! 三步握手的状态机状态及其 2-bit 观测编码。

use serde::Serialize;
use std::fmt;

/// 握手协议状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolState {
    #[default]
    Idle,
    SynReceived,
    AckReceived,
}

impl ProtocolState {
    pub const ALL: [ProtocolState; 3] = [
        ProtocolState::Idle,
        ProtocolState::SynReceived,
        ProtocolState::AckReceived,
    ];

    /// 白盒观测用的 2-bit 状态指示
    pub fn bits(self) -> u8 {
        match self {
            ProtocolState::Idle => 0,
            ProtocolState::SynReceived => 1,
            ProtocolState::AckReceived => 2,
        }
    }

    /// 从 2-bit 状态指示解码；3 不是合法编码
    pub fn from_bits(bits: u8) -> Option<ProtocolState> {
        match bits & 0b11 {
            0 => Some(ProtocolState::Idle),
            1 => Some(ProtocolState::SynReceived),
            2 => Some(ProtocolState::AckReceived),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProtocolState::Idle => "Idle",
            ProtocolState::SynReceived => "SynReceived",
            ProtocolState::AckReceived => "AckReceived",
        };
        f.write_str(name)
    }
}
