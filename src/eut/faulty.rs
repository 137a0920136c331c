//! 故障引擎模型
//!
//! 在符合协议的引擎外面包一层，注入一种确定的错误行为，用于验证 harness 能发现它。

use super::{Engine, EutInputs, EutOutputs, HandshakeEngine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fault {
    /// 不检查校验和：坏包也按正常符号处理
    IgnoreChecksum,
    /// 状态永远停在 Idle：只做校验与回显
    StuckIdle,
    /// 每个有效输出多保持一拍，造成重复输出
    DoubleOutput,
}

#[derive(Debug)]
pub struct FaultyEngine {
    fault: Fault,
    inner: HandshakeEngine,
    last: EutOutputs,
}

impl FaultyEngine {
    pub fn new(fault: Fault) -> Self {
        Self {
            fault,
            inner: HandshakeEngine::new(),
            last: EutOutputs::default(),
        }
    }
}

impl Engine for FaultyEngine {
    fn clock(&mut self, i: &EutInputs) -> EutOutputs {
        let out = match self.fault {
            Fault::IgnoreChecksum => {
                let patched = EutInputs {
                    checksum: i.data ^ 0xFF,
                    ..*i
                };
                self.inner.clock(&patched)
            }
            Fault::StuckIdle => {
                if i.rst || !i.in_valid {
                    EutOutputs {
                        out_valid: false,
                        state: 0,
                        ..self.last
                    }
                } else if i.data ^ i.checksum != 0xFF {
                    EutOutputs {
                        data: b'E',
                        out_valid: true,
                        state: 0,
                    }
                } else {
                    EutOutputs {
                        data: i.data,
                        out_valid: true,
                        state: 0,
                    }
                }
            }
            Fault::DoubleOutput => {
                let out = self.inner.clock(i);
                if !i.rst && !out.out_valid && self.last.out_valid {
                    EutOutputs {
                        data: self.last.data,
                        out_valid: true,
                        state: out.state,
                    }
                } else {
                    out
                }
            }
        };
        // DoubleOutput 只重复一次：重复出来的那一拍不再作为“上一拍有效输出”
        self.last = if self.fault == Fault::DoubleOutput && self.last.out_valid {
            EutOutputs {
                out_valid: false,
                ..out
            }
        } else {
            out
        };
        out
    }

    fn name(&self) -> &'static str {
        match self.fault {
            Fault::IgnoreChecksum => "faulty/ignore-checksum",
            Fault::StuckIdle => "faulty/stuck-idle",
            Fault::DoubleOutput => "faulty/double-output",
        }
    }
}
