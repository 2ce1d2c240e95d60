//! Goal tracking.
//!
//! `GoalTracker` owns the answered flags and the cursor of the goal the
//! persona is currently pursuing. Deciding whether a reply answers a
//! question is delegated to a `GoalMatcher` so the keyword heuristic can
//! be swapped for something smarter without touching the session.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Decides whether a trainee reply answers a goal question.
pub trait GoalMatcher: Send + Sync + Debug {
    fn is_answered(&self, question: &str, reply: &str) -> bool;
}

/// Marks a goal answered when the reply contains any sufficiently long
/// word of the question.
///
/// Known weak: common long words ("what", "your") give false positives
/// and paraphrases give false negatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGoalMatcher {
    /// Words must be strictly longer than this many characters.
    min_len: usize,
}

impl KeywordGoalMatcher {
    pub const DEFAULT_MIN_LEN: usize = 3;

    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    /// Lower-cased keywords of a question, surrounding punctuation removed.
    pub fn keywords(&self, question: &str) -> Vec<String> {
        question
            .split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| word.chars().count() > self.min_len)
            .collect()
    }
}

impl Default for KeywordGoalMatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LEN)
    }
}

impl GoalMatcher for KeywordGoalMatcher {
    fn is_answered(&self, question: &str, reply: &str) -> bool {
        let reply = reply.to_lowercase();
        self.keywords(question)
            .iter()
            .any(|keyword| reply.contains(keyword.as_str()))
    }
}

/// Answered flags plus the index of the goal being pursued.
///
/// Invariants: the flag count never changes, a flag never goes back to
/// `false`, every goal before `cursor` is answered, and `cursor` only
/// moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTracker {
    flags: Vec<bool>,
    cursor: usize,
}

impl GoalTracker {
    pub fn new(goal_count: usize) -> Self {
        Self {
            flags: vec![false; goal_count],
            cursor: 0,
        }
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.flags.iter().all(|answered| *answered)
    }

    /// Checks every unanswered goal against a reply.
    ///
    /// Returns the indices that flipped to answered.
    pub fn record_reply(
        &mut self,
        questions: &[String],
        reply: &str,
        matcher: &dyn GoalMatcher,
    ) -> Vec<usize> {
        debug_assert_eq!(questions.len(), self.flags.len());

        let mut newly_answered = Vec::new();
        for (index, question) in questions.iter().enumerate().take(self.flags.len()) {
            if !self.flags[index] && matcher.is_answered(question, reply) {
                self.flags[index] = true;
                newly_answered.push(index);
            }
        }
        newly_answered
    }

    /// First unanswered goal at or after the cursor, without moving it.
    pub fn pending_goal(&self) -> Option<usize> {
        (self.cursor..self.flags.len()).find(|&index| !self.flags[index])
    }

    /// Moves the cursor forward to the next unanswered goal.
    ///
    /// Returns `None` and parks the cursor past the end once every goal is
    /// answered.
    pub fn advance(&mut self) -> Option<usize> {
        match self.pending_goal() {
            Some(index) => {
                self.cursor = index;
                Some(index)
            }
            None => {
                self.cursor = self.flags.len();
                None
            }
        }
    }
}
