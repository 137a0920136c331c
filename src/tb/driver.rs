//! 激励驱动
//!
//! 从激励队列取包，随机等待 0..=max_jitter 个额外 tick 后，在下一个 tick 把
//! `in_valid`、符号和校验和拉起恰好一拍，然后撤销并唤醒 sequencer。
//! 同一时刻最多只有一个包在驱动中。

use super::sequencer::SequencerResume;
use super::world::tb_world;
use crate::eut::EutInputs;
use crate::proto::Packet;
use crate::sim::{Event, Simulator, World};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::mpsc::Receiver;
use tracing::{debug, trace};

#[derive(Debug)]
pub struct Driver {
    rx: Receiver<Packet>,
    rng: StdRng,
    max_jitter: u64,
    busy: bool,
    driven: u64,
    jitter_total: u64,
}

impl Driver {
    pub fn new(rx: Receiver<Packet>, rng: StdRng, max_jitter: u64) -> Self {
        Self {
            rx,
            rng,
            max_jitter,
            busy: false,
            driven: 0,
            jitter_total: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// 已完成一拍断言的包数
    pub fn driven(&self) -> u64 {
        self.driven
    }

    /// 累计插入的抖动 tick 数
    pub fn jitter_total(&self) -> u64 {
        self.jitter_total
    }

    /// 空闲时从激励队列取一个包并安排断言；返回是否开始了一次发送
    pub fn pump(&mut self, sim: &mut Simulator) -> bool {
        if self.busy {
            return false;
        }
        let Ok(pkt) = self.rx.try_recv() else {
            return false;
        };
        let jitter = self.rng.gen_range(0..=self.max_jitter);
        self.jitter_total += jitter;
        self.busy = true;
        debug!(%pkt, jitter, "driver 取到激励");
        sim.schedule_in(1 + jitter, DriveAssert { pkt });
        true
    }

    fn complete(&mut self) {
        self.busy = false;
        self.driven += 1;
    }
}

/// 事件：把包放到输入引脚上
#[derive(Debug)]
pub struct DriveAssert {
    pub pkt: Packet,
}

impl Event for DriveAssert {
    #[tracing::instrument(skip(self, sim, world), fields(pkt = %self.pkt))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DriveAssert { pkt } = *self;
        let w = tb_world(world);
        w.pins = EutInputs {
            rst: w.pins.rst,
            data: pkt.symbol(),
            checksum: pkt.checksum(),
            in_valid: true,
        };
        trace!(now = ?sim.now(), "in_valid 拉高");
        sim.schedule_in(1, DriveRelease);
    }
}

/// 事件：一拍之后撤销输入，并让 sequencer 继续
#[derive(Debug)]
pub struct DriveRelease;

impl Event for DriveRelease {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = tb_world(world);
        w.pins = EutInputs {
            rst: w.pins.rst,
            ..EutInputs::default()
        };
        w.driver.complete();
        trace!(now = ?sim.now(), driven = w.driver.driven(), "in_valid 撤销");
        sim.schedule_in(0, SequencerResume);
    }
}
