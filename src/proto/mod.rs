//! 协议模块
//!
//! 握手协议的数据模型（状态、包、符号）与参考模型。

mod model;
mod packet;
mod state;

pub use model::{ReferenceModel, ResponseKind, Step, Transition, TransitionEdge, step};
pub use packet::{
    ACK, CHECKSUM_KEY, COMPLETE, CORRUPT_KEY, ERROR, InputClass, MISC, NOISE, Packet, SYN,
    SYN_ACK, Sym, checksum_of,
};
pub use state::ProtocolState;
