//! 错误类型
//!
//! 逐包的不一致（期望不符、意外输出）只记录在 scoreboard 里，不属于这里；
//! 这里只有会中止一次运行的错误。

use crate::proto::ProtocolState;
use crate::sim::SimTime;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// 运行结束时观测到的状态既不是 AckReceived，也不是复位后的 Idle
    #[error("protocol stuck: final observed state {state} at tick {}", .tick.0)]
    ProtocolStuck { state: ProtocolState, tick: SimTime },

    /// 最终观测到的状态指示不是合法编码
    #[error("final state indicator {raw:#04b} is not a valid encoding")]
    UnknownState { raw: u8 },

    /// 仿真在判定之前就结束了
    #[error("simulation ended at tick {} before the final verdict", .tick.0)]
    Incomplete { tick: SimTime },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("encode report: {0}")]
    ReportEncode(#[source] serde_json::Error),

    #[error("write report {}: {source}", .path.display())]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// 是否为判定失败（而不是配置/IO 问题）
    pub fn is_fatal_verdict(&self) -> bool {
        matches!(
            self,
            HarnessError::ProtocolStuck { .. } | HarnessError::UnknownState { .. }
        )
    }
}
