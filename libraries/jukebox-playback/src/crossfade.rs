//! Linear crossfade between the two channels
//!
//! The fade is counted in whole ticks rather than accumulated floats, so a
//! 2000ms fade on a 50ms tick always completes on exactly the 40th tick.

/// Volumes to write on one fade tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeLevels {
    /// Volume of the channel being left
    pub outgoing: f32,

    /// Volume of the channel taking over
    pub incoming: f32,
}

/// In-flight crossfade between two channel slots
#[derive(Debug, Clone, PartialEq)]
pub struct Crossfade {
    outgoing: usize,
    incoming: usize,
    start_volume: f32,
    step: u32,
    steps: u32,
}

impl Crossfade {
    /// Start a fade from `outgoing` (currently at `start_volume`) to `incoming`
    pub fn new(outgoing: usize, incoming: usize, start_volume: f32, steps: u32) -> Self {
        Self {
            outgoing,
            incoming,
            start_volume: start_volume.clamp(0.0, 1.0),
            step: 0,
            steps: steps.max(1),
        }
    }

    /// Slot being faded out
    pub fn outgoing(&self) -> usize {
        self.outgoing
    }

    /// Slot being faded in
    pub fn incoming(&self) -> usize {
        self.incoming
    }

    /// Ticks taken so far
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Total ticks in this fade
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.step as f32 / self.steps as f32
    }

    /// Check if the last tick has been taken
    pub fn is_complete(&self) -> bool {
        self.step >= self.steps
    }

    /// Take one tick and return the volumes to apply
    ///
    /// Outgoing volume is `v0 * (1 - k/n)`, incoming is `k/n`. Extra ticks
    /// after completion keep returning the final levels.
    pub fn tick(&mut self) -> FadeLevels {
        if self.step < self.steps {
            self.step += 1;
        }
        self.levels()
    }

    /// Volumes for the current step
    pub fn levels(&self) -> FadeLevels {
        if self.is_complete() {
            return Self::final_levels();
        }

        let k = self.progress();
        FadeLevels {
            outgoing: (self.start_volume * (1.0 - k)).clamp(0.0, 1.0),
            incoming: k.clamp(0.0, 1.0),
        }
    }

    /// Volumes once the fade has finished
    pub fn final_levels() -> FadeLevels {
        FadeLevels {
            outgoing: 0.0,
            incoming: 1.0,
        }
    }
}
