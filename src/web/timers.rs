//! setTimeout-backed scheduler. Fired ticks are routed back into the running game.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::ScheduleError;
use crate::playback::{Scheduler, Tick, TimerHandle};

pub struct WebTimers {
    window: Window,
}

impl WebTimers {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WebTimers {
    fn schedule(&mut self, delay_ms: u32, tick: Tick) -> Result<TimerHandle, ScheduleError> {
        let callback = Closure::once_into_js(move || super::on_timer(tick));
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .map(TimerHandle)
            .map_err(|err| ScheduleError(format!("{err:?}")))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }
}
