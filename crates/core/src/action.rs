// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-triggerable run actions and the evaluator that derives them.

use crate::descriptor::StatusDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An action a user may trigger on a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Apply,
    Cancel,
    Discard,
    Retry,
    ForceCancel,
    OverrideAndContinue,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Apply,
        Action::Cancel,
        Action::Discard,
        Action::Retry,
        Action::ForceCancel,
        Action::OverrideAndContinue,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Path segment of the backend action endpoint, if the backend exposes one.
    ///
    /// `Retry` and `OverrideAndContinue` have no endpoint.
    pub fn endpoint(self) -> Option<&'static str> {
        match self {
            Action::Apply => Some("apply"),
            Action::Cancel => Some("cancel"),
            Action::Discard => Some("discard"),
            Action::ForceCancel => Some("force-cancel"),
            Action::Retry | Action::OverrideAndContinue => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Apply => write!(f, "apply"),
            Action::Cancel => write!(f, "cancel"),
            Action::Discard => write!(f, "discard"),
            Action::Retry => write!(f, "retry"),
            Action::ForceCancel => write!(f, "force-cancel"),
            Action::OverrideAndContinue => write!(f, "override-and-continue"),
        }
    }
}

/// Small copyable set of [`Action`]s, usable in constant tables.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    /// Build a set from a slice of actions (usable in `const` context).
    pub const fn of(actions: &[Action]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < actions.len() {
            bits |= actions[i].bit();
            i += 1;
        }
        ActionSet(bits)
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the members in [`Action::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        ActionSet(iter.into_iter().fold(0, |bits, a| bits | a.bit()))
    }
}

impl Serialize for ActionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ActionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let actions = Vec::<Action>::deserialize(deserializer)?;
        Ok(actions.into_iter().collect())
    }
}

/// Actions currently valid for a classified status.
pub fn available_actions(descriptor: &StatusDescriptor) -> ActionSet {
    descriptor.actions
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
