//! Headless runtime primitives for deterministic page runs.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical viewport width used by the headless run.
    pub width: u32,
    /// Logical viewport height used by the headless run.
    pub height: u32,
    /// Upper bound on frames executed across the whole scenario.
    pub max_frames: u64,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            max_frames: 100_000,
            tick_ms: 16,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("headless dimensions must be non-zero");
        }
        if self.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(())
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Logical time advanced by this frame.
    pub delta_ms: u64,
}

/// Deterministic headless frame loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run `frames` frames of `cfg.tick_ms` each.
    pub fn run<F>(cfg: HeadlessRunConfig, frames: u32, on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        Self::run_for(cfg, frames, u64::from(frames).saturating_mul(cfg.tick_ms), on_frame)
    }

    /// Run enough frames to cover `ms` logical milliseconds; the last frame
    /// is shortened so the total is exact.
    pub fn run_ms<F>(cfg: HeadlessRunConfig, ms: u64, on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        Self::run_for(cfg, wait_frames(ms, cfg.tick_ms), ms, on_frame)
    }

    fn run_for<F>(cfg: HeadlessRunConfig, frames: u32, total_ms: u64, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        cfg.validate()?;
        let mut remaining_ms = total_ms;
        for frame in 0..frames {
            let delta_ms = remaining_ms.min(cfg.tick_ms);
            remaining_ms = remaining_ms.saturating_sub(delta_ms);
            on_frame(&HeadlessContext {
                frame_index: frame,
                delta_ms,
            });
        }
        Ok(())
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}
