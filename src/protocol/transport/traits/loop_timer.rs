//! Asynchronous timer abstraction providing the idle yield of the bridge loop.

/// Timer trait abstraction; the bridge awaits it whenever a loop pass found nothing to do.
pub trait LoopTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}

/// [`LoopTimer`] backed by `embassy-time`; the firmware must link a time driver.
#[cfg(feature = "embassy")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

#[cfg(feature = "embassy")]
impl LoopTimer for EmbassyTimer {
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a {
        embassy_time::Timer::after_millis(millis as u64)
    }
}
