//! Hold counters, in tenths of a second.

pub const HOLD1_START: i32 = -300;
pub const HOLD2_START: i32 = -150;
/// Inclusive ceiling; a counter sitting here ends its phase.
pub const SEC10TH_MAX: i32 = 999;

/// Outcome of a single tick applied to a counter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Counted,
    CrossedZero,
    Saturated,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HoldCounter {
    value: i32,
    start: i32,
}

impl HoldCounter {
    pub fn new(start: i32) -> Self {
        Self { value: start, start }
    }

    pub fn hold1() -> Self {
        Self::new(HOLD1_START)
    }

    pub fn hold2() -> Self {
        Self::new(HOLD2_START)
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = self.start;
    }

    pub fn step(&mut self) -> Step {
        if self.value >= SEC10TH_MAX {
            return Step::Saturated;
        }
        self.value += 1;
        if self.value == 0 {
            Step::CrossedZero
        } else {
            Step::Counted
        }
    }

    pub fn text(&self) -> String {
        format_sec10th(self.value)
    }
}

/// Format tenths of a second as "+S.T" / "-S.T", sign always shown.
pub fn format_sec10th(sec10th: i32) -> String {
    let sign = if sec10th >= 0 { '+' } else { '-' };
    let abs = sec10th.unsigned_abs();
    format!("{}{}.{}", sign, abs / 10, abs % 10)
}
