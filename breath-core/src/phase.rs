/// One stage of the breathing cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Undefined,
    /// Deep breath
    Breathe0,
    /// Exhale + hold
    Hold1,
    /// Inhale + hold
    Hold2,
    /// Breathe normally
    Normal3,
}

/// The two logical inputs the cycle understands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Advance,
    Reset,
}

const TRANSITIONS: [(Phase, Action, Phase); 5] = [
    (Phase::Breathe0, Action::Advance, Phase::Hold1),
    (Phase::Hold1, Action::Advance, Phase::Hold2),
    (Phase::Hold2, Action::Advance, Phase::Normal3),
    (Phase::Normal3, Action::Advance, Phase::Breathe0),
    (Phase::Undefined, Action::Advance, Phase::Undefined),
];

/// Next phase for `action` taken in `current`. Reset overrides the cycle.
pub fn transition(current: Phase, action: Action) -> Phase {
    if action == Action::Reset {
        return Phase::Breathe0;
    }
    TRANSITIONS
        .iter()
        .find(|(from, on, _)| *from == current && *on == action)
        .map(|(_, _, to)| *to)
        .unwrap_or(current)
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Undefined => "",
            Phase::Breathe0 => "0: Deep breath",
            Phase::Hold1 => "1: Exhale & hold",
            Phase::Hold2 => "2: Inhale & hold",
            Phase::Normal3 => "3: Breathe normally",
        }
    }

    /// Holding phases are the only ones with a live tick.
    pub fn is_holding(&self) -> bool {
        matches!(self, Phase::Hold1 | Phase::Hold2)
    }
}
