//! Live caregiver domains with an undo trail.

use crate::encoder::EncodedModel;

/// For each visit, the caregivers still allowed to serve it.
///
/// Removals are logged on a trail; [`undo`](Self::undo) restores every
/// removal made after a [`mark`](Self::mark).
#[derive(Debug, Clone)]
pub(crate) struct Domains {
    live: Vec<Vec<bool>>,
    size: Vec<usize>,
    trail: Vec<(usize, usize)>,
}

impl Domains {
    /// Root domains: eligible caregivers whose full capacity fits the visit.
    pub fn new(model: &EncodedModel<'_>) -> Self {
        let live: Vec<Vec<bool>> = (0..model.visit_count())
            .map(|v| {
                let mut row = vec![false; model.caregiver_count()];
                for &c in model.candidates(v) {
                    row[c] = model.duration(v) <= model.capacity(c);
                }
                row
            })
            .collect();
        let size = live
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .collect();
        Self {
            live,
            size,
            trail: Vec::new(),
        }
    }

    pub fn size(&self, visit: usize) -> usize {
        self.size[visit]
    }

    /// Live caregivers of a visit, ascending.
    pub fn values(&self, visit: usize) -> impl Iterator<Item = usize> + '_ {
        self.live[visit]
            .iter()
            .enumerate()
            .filter_map(|(c, &alive)| alive.then_some(c))
    }

    /// Removes a caregiver from a visit's domain. Returns false if it was
    /// already gone.
    pub fn remove(&mut self, visit: usize, caregiver: usize) -> bool {
        if !self.live[visit][caregiver] {
            return false;
        }
        self.live[visit][caregiver] = false;
        self.size[visit] -= 1;
        self.trail.push((visit, caregiver));
        true
    }

    pub fn mark(&self) -> usize {
        self.trail.len()
    }

    pub fn undo(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some((visit, caregiver)) = self.trail.pop() {
                self.live[visit][caregiver] = true;
                self.size[visit] += 1;
            }
        }
    }
}
