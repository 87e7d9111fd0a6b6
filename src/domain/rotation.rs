// Slide rotation state machine

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    Idle,
    Rotating,
}

/// The slide being hidden and the slide being shown by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub hidden: usize,
    pub shown: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    phase: RotationPhase,
    index: usize,
    slide_count: usize,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::idle()
    }
}

impl Rotation {
    pub fn idle() -> Self {
        Self {
            phase: RotationPhase::Idle,
            index: 0,
            slide_count: 0,
        }
    }

    /// Reset to slide 0. Returns true when a tick timer is needed.
    pub fn start(&mut self, slide_count: usize) -> bool {
        self.index = 0;
        self.slide_count = slide_count;
        self.phase = if slide_count > 1 {
            RotationPhase::Rotating
        } else {
            RotationPhase::Idle
        };
        self.phase == RotationPhase::Rotating
    }

    pub fn stop(&mut self) {
        self.phase = RotationPhase::Idle;
    }

    pub fn tick(&mut self) -> Option<SlideChange> {
        if self.phase != RotationPhase::Rotating {
            return None;
        }
        let hidden = self.index;
        self.index = (self.index + 1) % self.slide_count;
        Some(SlideChange {
            hidden,
            shown: self.index,
        })
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    /// Index of the visible slide, if there is anything to show
    pub fn active(&self) -> Option<usize> {
        (self.slide_count > 0).then_some(self.index)
    }
}
