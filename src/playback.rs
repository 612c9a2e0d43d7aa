use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Per-frame time source. The windowed loop samples a monotonic clock; tests
/// use a fixed step so frame counts are deterministic.
pub enum FrameClock {
    Monotonic { last: Instant },
    Manual { step: f32 },
}

impl FrameClock {
    pub fn monotonic() -> Self {
        Self::Monotonic {
            last: Instant::now(),
        }
    }

    pub fn manual(step: f32) -> Self {
        Self::Manual { step }
    }

    /// Seconds elapsed since the previous call.
    pub fn delta(&mut self) -> f32 {
        match self {
            FrameClock::Monotonic { last } => {
                let now = Instant::now();
                let dt = now.duration_since(*last).as_secs_f32();
                *last = now;
                dt
            }
            FrameClock::Manual { step } => *step,
        }
    }
}

/// Cloneable flag that ends a [`RenderLoop`] after the current frame.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The render loop as an explicit, cancellable construct: a clock plus a
/// stop handle. The windowed shell calls [`RenderLoop::begin_frame`] once
/// per redraw; tests drive a bounded number of frames through
/// [`RenderLoop::run_frames`].
pub struct RenderLoop {
    clock: FrameClock,
    stop: StopHandle,
}

impl RenderLoop {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            stop: StopHandle::new(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Starts one frame: `None` once the stop handle is flipped, otherwise
    /// the elapsed time since the previous frame.
    pub fn begin_frame(&mut self) -> Option<f32> {
        if self.stop.is_stopped() {
            return None;
        }
        Some(self.clock.delta())
    }

    /// Runs at most `max` frames, calling `frame` with each delta. Returns
    /// the number of frames that actually ran.
    pub fn run_frames(&mut self, max: usize, mut frame: impl FnMut(f32)) -> usize {
        let mut ran = 0;
        for _ in 0..max {
            match self.begin_frame() {
                Some(dt) => {
                    frame(dt);
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }
}
