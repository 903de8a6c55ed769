use itertools::Itertools;
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::Formatter;

/// One application of a grammar production, e.g. `expression → expression + term`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationStep {
    pub symbol: String,
    pub expansion: String,
}

impl DerivationStep {
    pub fn new(symbol: impl Into<String>, expansion: impl Into<String>) -> DerivationStep {
        DerivationStep {
            symbol: symbol.into(),
            expansion: expansion.into(),
        }
    }
}

impl fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.symbol, self.expansion)
    }
}

/// The productions applied during a single parse, most recent first.
///
/// Every step is inserted at the front, so reading front to back gives the
/// reverse of the order in which the parser reduced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derivation {
    steps: VecDeque<DerivationStep>,
}

impl Derivation {
    pub fn new() -> Derivation {
        Derivation::default()
    }

    pub fn record(&mut self, symbol: impl Into<String>, expansion: impl Into<String>) {
        let step = DerivationStep::new(symbol, expansion);
        log::trace!("Reduce {}", step);
        self.steps.push_front(step);
    }

    pub fn reset(&mut self) {
        self.steps.clear();
    }

    pub fn snapshot(&self) -> Vec<DerivationStep> {
        self.steps.iter().cloned().collect()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, DerivationStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// One step per line, most recent first.
impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.iter().join("\n"))
    }
}

impl<'a> IntoIterator for &'a Derivation {
    type Item = &'a DerivationStep;
    type IntoIter = vec_deque::Iter<'a, DerivationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
