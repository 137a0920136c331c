//! 运行配置
//!
//! `HarnessConfig` 可以从 JSON 文件读取（缺省字段取默认值），再由命令行参数覆盖。

use crate::error::HarnessError;
use crate::eut::Fault;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// 随机种子（生成器与 driver 抖动都由它派生）
    pub seed: u64,
    /// C 阶段随机包数量
    pub packets: u64,
    /// 故意破坏校验和的概率
    pub error_rate: f64,
    /// driver 发送前最多额外等待的 tick 数
    pub max_jitter: u64,
    /// 复位保持的 tick 数
    pub reset_ticks: u64,
    /// 最后一个激励之后等待输出排空的 tick 数
    pub drain_ticks: u64,
    /// 用故障引擎代替符合协议的引擎（`"ignore-checksum"` 等）
    pub fault: Option<Fault>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            packets: 20,
            error_rate: 0.2,
            max_jitter: 2,
            reset_ticks: 3,
            drain_ticks: 10,
            fault: None,
        }
    }
}

impl HarnessConfig {
    pub fn from_json(raw: &str) -> Result<Self, HarnessError> {
        let cfg: HarnessConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let raw = fs::read_to_string(path).map_err(|source| HarnessError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(HarnessError::InvalidConfig(format!(
                "error_rate must be within [0, 1], got {}",
                self.error_rate
            )));
        }
        if self.reset_ticks == 0 {
            return Err(HarnessError::InvalidConfig(
                "reset_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
