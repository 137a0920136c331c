//! 符号包
//!
//! 定义激励包、输入类别以及协议用到的符号常量。

use serde::Serialize;
use std::fmt;

/// 发起握手
pub const SYN: u8 = b'S';
/// 完成握手
pub const ACK: u8 = b'K';
/// 噪声符号
pub const NOISE: u8 = b'Z';
/// 普通数据符号
pub const MISC: [u8; 2] = [b'X', b'Y'];
/// 对 SYN 的应答
pub const SYN_ACK: u8 = b'A';
/// 握手完成应答
pub const COMPLETE: u8 = b'C';
/// 校验失败时的输出
pub const ERROR: u8 = b'E';

/// 正确校验和：`symbol ^ CHECKSUM_KEY`
pub const CHECKSUM_KEY: u8 = 0xFF;
/// 故意注入错误时使用的异或常量
pub const CORRUPT_KEY: u8 = 0xAA;

/// 符号的正确校验和
pub fn checksum_of(symbol: u8) -> u8 {
    symbol ^ CHECKSUM_KEY
}

/// 输入类别（覆盖率的输入分箱）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputClass {
    Syn,
    Ack,
    Noise,
    Misc,
}

impl InputClass {
    pub const ALL: [InputClass; 4] = [
        InputClass::Syn,
        InputClass::Ack,
        InputClass::Noise,
        InputClass::Misc,
    ];

    pub fn of(symbol: u8) -> InputClass {
        match symbol {
            SYN => InputClass::Syn,
            ACK => InputClass::Ack,
            NOISE => InputClass::Noise,
            _ => InputClass::Misc,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InputClass::Syn => "syn",
            InputClass::Ack => "ack",
            InputClass::Noise => "noise",
            InputClass::Misc => "misc",
        }
    }
}

/// 激励包：构造后不可变，由创建者持有直到交给 driver。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    symbol: u8,
    checksum: u8,
    class: InputClass,
}

impl Packet {
    /// 任意校验和
    pub fn with_checksum(symbol: u8, checksum: u8) -> Self {
        Self {
            symbol,
            checksum,
            class: InputClass::of(symbol),
        }
    }

    /// 校验和正确的包
    pub fn valid(symbol: u8) -> Self {
        Self::with_checksum(symbol, checksum_of(symbol))
    }

    /// 校验和被故意破坏的包
    pub fn corrupted(symbol: u8) -> Self {
        Self::with_checksum(symbol, symbol ^ CORRUPT_KEY)
    }

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    pub fn class(&self) -> InputClass {
        self.class
    }

    pub fn has_valid_checksum(&self) -> bool {
        self.checksum == checksum_of(self.symbol)
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/0x{:02X}{}",
            Sym(self.symbol),
            self.checksum,
            if self.has_valid_checksum() { "" } else { "!" }
        )
    }
}

/// 符号的可读形式：可打印 ASCII 显示为字符，其余显示为十六进制。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sym(pub u8);

impl fmt::Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "0x{:02X}", self.0)
        }
    }
}
