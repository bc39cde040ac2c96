use tracing::debug;

use crate::session::SessionState;
use crate::target::Target;

/// What the player has typed since the last destroyed target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Appends `c` lowercased. Returns how many chars that added, which is
    /// more than one for letters like 'İ' whose lowercase form is two chars.
    pub fn push(&mut self, c: char) -> usize {
        let lower = c.to_lowercase();
        let added = lower.clone().count();
        self.text.extend(lower);
        added
    }

    pub fn erase(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Erase,
    Char(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The buffer spelled out a whole word; that target is gone
    Matched { id: u64, text: String },
    /// The buffer is a prefix of a live target's word
    PartialMatch { id: u64 },
    NoMatch,
}

impl MatchOutcome {
    /// Drives the valid/invalid color of the input line
    pub fn is_valid(&self) -> bool {
        !matches!(self, MatchOutcome::NoMatch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exact(usize),
    Prefix(usize),
    None,
}

/// Scans targets in creation order and stops at the first one whose word
/// equals the buffer or, failing that, starts with it
pub fn resolve(buffer: &str, targets: &[Target]) -> Resolution {
    for (idx, target) in targets.iter().enumerate() {
        if target.text() == buffer {
            return Resolution::Exact(idx);
        }
        if !buffer.is_empty() && target.text().starts_with(buffer) {
            return Resolution::Prefix(idx);
        }
    }
    Resolution::None
}

/// Index of the target the current buffer is working toward
pub fn focus(buffer: &InputBuffer, targets: &[Target]) -> Option<usize> {
    match resolve(buffer.as_str(), targets) {
        Resolution::Exact(idx) | Resolution::Prefix(idx) => Some(idx),
        Resolution::None => None,
    }
}

pub fn on_key(
    key: KeyInput,
    buffer: &mut InputBuffer,
    targets: &mut Vec<Target>,
    session: &mut SessionState,
) -> MatchOutcome {
    match key {
        KeyInput::Erase => buffer.erase(),
        KeyInput::Char(c) => {
            let added = buffer.push(c);
            session.record_keystrokes(added);
        }
    }

    match resolve(buffer.as_str(), targets) {
        Resolution::Exact(idx) => {
            let target = targets.remove(idx);
            session.record_match(buffer.char_len());
            buffer.clear();
            debug!(id = target.id, word = target.text(), "Target destroyed");
            MatchOutcome::Matched {
                id: target.id,
                text: target.text().to_string(),
            }
        }
        Resolution::Prefix(idx) => MatchOutcome::PartialMatch {
            id: targets[idx].id,
        },
        Resolution::None => MatchOutcome::NoMatch,
    }
}
