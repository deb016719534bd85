use crate::types::{ClassId, Problem, SubjectId};
use std::collections::HashMap;

/// Credits at or above this threshold add one lab session
pub const LAB_CREDIT_THRESHOLD: u32 = 3;

/// Per-class bag of required sessions.
///
/// Keeps subject insertion order alongside the counts: the topological
/// orderer consumes zero-in-degree subjects in insertion order, and progress
/// sums walk the same sequence so results do not depend on hash ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionBag {
    order: Vec<SubjectId>,
    counts: HashMap<SubjectId, u32>,
}

impl SessionBag {
    pub fn insert(&mut self, subject: SubjectId, sessions: u32) {
        if !self.counts.contains_key(&subject) {
            self.order.push(subject.clone());
        }
        self.counts.insert(subject, sessions);
    }

    /// Required session count for a subject (0 when absent)
    pub fn required(&self, subject: &SubjectId) -> u32 {
        self.counts.get(subject).copied().unwrap_or(0)
    }

    pub fn contains(&self, subject: &SubjectId) -> bool {
        self.counts.contains_key(subject)
    }

    /// Subjects in insertion order
    pub fn subjects(&self) -> &[SubjectId] {
        &self.order
    }

    /// Total sessions required across all subjects
    pub fn total_sessions(&self) -> u32 {
        self.order.iter().map(|s| self.required(s)).sum()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Expand per-subject credits into concrete per-class session requirements.
///
/// A subject with credits c > 0 needs c theory sessions; c >= 3 additionally
/// derives one lab session, inserted right after its base subject.
pub fn expand_requirements(problem: &Problem) -> HashMap<ClassId, SessionBag> {
    let mut requirements = HashMap::new();

    for class in &problem.classes {
        let mut bag = SessionBag::default();
        for subject in &problem.subjects {
            let credits = problem.subject_credits.get(subject).copied().unwrap_or(0);
            if credits == 0 {
                continue;
            }
            bag.insert(subject.clone(), credits);
            if credits >= LAB_CREDIT_THRESHOLD {
                bag.insert(subject.lab(), 1);
            }
        }
        requirements.insert(class.clone(), bag);
    }

    requirements
}
