use num_traits::ToPrimitive;

use breath_core::{DisplaySink, HapticSink, Label, TickScheduler, TimerHandle, TimerSlot};

use crate::alerts::{short_pulse, AlertConfig};
use crate::ui::Screen;

/// Opcodes understood by the tick pump thread.
#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub enum PumpOp {
    /// arg1 = raw handle, arg2 = delay in ms
    Arm = 0,
    Quit,
}

/// Everything the phase controller reaches outside itself.
pub struct Device {
    pub screen: Screen,
    llio: llio::Llio,
    alert_config: AlertConfig,
    pump_conn: xous::CID,
    slot: TimerSlot,
}

impl Device {
    pub fn new(llio: llio::Llio, alert_config: AlertConfig, pump_conn: xous::CID) -> Self {
        Self {
            screen: Screen::new(),
            llio,
            alert_config,
            pump_conn,
            slot: TimerSlot::new(),
        }
    }

    /// True if `handle` is still the pending tick; consumes it.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        self.slot.fire(handle)
    }

    pub fn stop_pump(&self) {
        xous::send_message(
            self.pump_conn,
            xous::Message::new_scalar(PumpOp::Quit.to_usize().unwrap(), 0, 0, 0, 0),
        )
        .ok();
    }
}

impl DisplaySink for Device {
    fn set_text(&mut self, label: Label, text: &str) {
        self.screen.set_text(label, text);
    }
}

impl HapticSink for Device {
    fn vibrate_short_pulse(&mut self) {
        short_pulse(&self.alert_config, &self.llio);
    }
}

impl TickScheduler for Device {
    fn arm(&mut self, delay_ms: u32) -> TimerHandle {
        let handle = self.slot.arm();
        xous::send_message(
            self.pump_conn,
            xous::Message::new_scalar(
                PumpOp::Arm.to_usize().unwrap(),
                handle.to_raw() as usize,
                delay_ms as usize,
                0,
                0,
            ),
        )
        .ok();
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        // The pump may still post it; `fire` drops it on arrival.
        self.slot.cancel(handle);
    }
}
