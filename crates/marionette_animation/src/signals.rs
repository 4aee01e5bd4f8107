use rustc_hash::FxHashMap;

/// Keys gameplay code uses to signal the animator's transition predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// An action animation must not be interrupted.
    ActionLocked,
    Moving,
    Grounded,
    Speed,
    Custom(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalValue {
    Bool(bool),
    Float(f32),
}

impl From<bool> for SignalValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for SignalValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

/// Typed signal bag shared between gameplay and transition predicates.
///
/// The animator stores it but never reads it itself.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    values: FxHashMap<Signal, SignalValue>,
}

impl Signals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, signal: Signal, value: impl Into<SignalValue>) {
        self.values.insert(signal, value.into());
    }

    #[must_use]
    pub fn get(&self, signal: Signal) -> Option<SignalValue> {
        self.values.get(&signal).copied()
    }

    /// Boolean value of `signal`; `false` when unset or not a boolean.
    #[must_use]
    pub fn flag(&self, signal: Signal) -> bool {
        matches!(self.get(signal), Some(SignalValue::Bool(true)))
    }

    #[must_use]
    pub fn float(&self, signal: Signal) -> Option<f32> {
        match self.get(signal)? {
            SignalValue::Float(v) => Some(v),
            SignalValue::Bool(_) => None,
        }
    }

    pub fn remove(&mut self, signal: Signal) -> Option<SignalValue> {
        self.values.remove(&signal)
    }

    #[must_use]
    pub fn contains(&self, signal: Signal) -> bool {
        self.values.contains_key(&signal)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
