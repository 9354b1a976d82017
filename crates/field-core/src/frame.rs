//! Host-agnostic frame loop. The host supplies a [`FrameScheduler`]
//! (`requestAnimationFrame` on the web, a counter in tests) and calls
//! [`FrameLoop::tick`] from its frame callback.

use crate::field::Field;
use crate::surface::Surface;
use instant::Instant;

/// Opaque id of a pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    /// Ask the host to invoke the frame callback once more. `None` means the
    /// host refused; the loop then stops on its own.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

const FPS_SAMPLE_FRAMES: u64 = 600;

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameHandle>,
    running: bool,
    frames: u64,
    sample_start: Option<Instant>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            running: false,
            frames: 0,
            sample_start: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            self.running = false;
        }
    }

    /// Frame callback body: request the next frame, resize, then render.
    pub fn tick<D: Surface + ?Sized>(
        &mut self,
        field: &mut Field,
        surface: &mut D,
        width: f64,
        height: f64,
    ) {
        if !self.running {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            self.running = false;
        }
        field.resize(width, height);
        field.frame(surface);
        self.frames += 1;
        self.sample_rate();
    }

    /// Cancel any pending request; later ticks are ignored.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.running = false;
    }

    fn sample_rate(&mut self) {
        let start = *self.sample_start.get_or_insert_with(Instant::now);
        if self.frames % FPS_SAMPLE_FRAMES == 0 {
            let secs = start.elapsed().as_secs_f64();
            if secs > 0.0 {
                log::debug!("[frame] {:.1} fps", FPS_SAMPLE_FRAMES as f64 / secs);
            }
            self.sample_start = Some(Instant::now());
        }
    }
}

/// Scheduler that just hands out increasing ids; used for tests and the
/// headless runner, which call `tick` themselves.
#[derive(Default, Debug)]
pub struct ManualScheduler {
    next_id: i32,
    pub requested: u32,
    pub cancelled: Vec<FrameHandle>,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id = self.next_id.wrapping_add(1);
        self.requested = self.requested.wrapping_add(1);
        Some(FrameHandle(self.next_id))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}
