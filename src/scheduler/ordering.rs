use super::SessionBag;
use crate::types::{Problem, SubjectId};
use std::collections::{HashMap, VecDeque};

/// Topologically order a class's required subjects.
///
/// Edges: declared prerequisite P -> S for base subjects, and the implicit
/// S -> "S Lab" dependency. Kahn's algorithm consumes zero-in-degree nodes
/// in insertion order. A cycle means ill-formed input; the declared order is
/// returned instead so scheduling can proceed and the Verifier reports any
/// fallout.
pub fn order_subjects(problem: &Problem, bag: &SessionBag) -> Vec<SubjectId> {
    let subjects = bag.subjects();
    let position: HashMap<&SubjectId, usize> = subjects
        .iter()
        .enumerate()
        .map(|(idx, subject)| (subject, idx))
        .collect();

    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); subjects.len()];
    let mut in_degree: Vec<usize> = vec![0; subjects.len()];

    for (idx, subject) in subjects.iter().enumerate() {
        if subject.is_lab() {
            if let Some(&base_idx) = position.get(&subject.base()) {
                edges[base_idx].push(idx);
                in_degree[idx] += 1;
            }
        } else {
            for prereq in problem.prerequisites(subject) {
                if let Some(&prereq_idx) = position.get(prereq) {
                    if prereq_idx != idx {
                        edges[prereq_idx].push(idx);
                        in_degree[idx] += 1;
                    }
                }
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..subjects.len())
        .filter(|&idx| in_degree[idx] == 0)
        .collect();
    let mut ordered = Vec::with_capacity(subjects.len());

    while let Some(idx) = queue.pop_front() {
        ordered.push(subjects[idx].clone());
        for &next in &edges[idx] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if ordered.len() == subjects.len() {
        ordered
    } else {
        subjects.to_vec()
    }
}
