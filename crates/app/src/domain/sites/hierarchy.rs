//! Reporting hierarchy built from flat manager references.
//!
//! Each collaborator is attached under its manager when that manager is part
//! of the same input; otherwise (no manager, a manager outside the input, or
//! itself) it becomes a root. Dangling references never fail generation.
//!
//! A pure reporting cycle (A reports to B, B reports to A) has no root to hang
//! from, so its members are left out of the forest. Writes reject such cycles;
//! the builder only sees them in data that predates that check.

use rustc_hash::FxHashMap;

use crate::domain::collaborators::records::{CollaboratorRecord, CollaboratorUuid};

/// A collaborator and their direct reports.
#[derive(Debug, Clone, PartialEq)]
pub struct OrgNode {
    pub collaborator: CollaboratorRecord,
    pub reports: Vec<OrgNode>,
}

impl OrgNode {
    /// Number of collaborators in this subtree, including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.reports.iter().map(Self::size).sum::<usize>()
    }

    /// Visit this subtree depth-first, passing each collaborator with the id
    /// of the node it hangs under.
    pub fn walk<'a, F>(&'a self, parent: Option<CollaboratorUuid>, visit: &mut F)
    where
        F: FnMut(&'a CollaboratorRecord, Option<CollaboratorUuid>),
    {
        visit(&self.collaborator, parent);

        for report in &self.reports {
            report.walk(Some(self.collaborator.uuid), visit);
        }
    }
}

/// Build the reporting forest for one company's collaborators.
///
/// Roots and siblings keep their input order.
#[must_use]
pub fn build_hierarchy(collaborators: Vec<CollaboratorRecord>) -> Vec<OrgNode> {
    let index: FxHashMap<CollaboratorUuid, usize> = collaborators
        .iter()
        .enumerate()
        .map(|(position, collaborator)| (collaborator.uuid, position))
        .collect();

    let mut reports: Vec<Vec<usize>> = vec![Vec::new(); collaborators.len()];
    let mut roots = Vec::new();

    for (position, collaborator) in collaborators.iter().enumerate() {
        let manager = collaborator
            .manager_uuid
            .and_then(|manager| index.get(&manager).copied())
            .filter(|&manager| manager != position);

        match manager.and_then(|manager| reports.get_mut(manager)) {
            Some(siblings) => siblings.push(position),
            None => roots.push(position),
        }
    }

    let mut slots: Vec<Option<CollaboratorRecord>> =
        collaborators.into_iter().map(Some).collect();

    roots
        .into_iter()
        .filter_map(|root| assemble(root, &mut slots, &reports))
        .collect()
}

fn assemble(
    position: usize,
    slots: &mut [Option<CollaboratorRecord>],
    reports: &[Vec<usize>],
) -> Option<OrgNode> {
    let collaborator = slots.get_mut(position)?.take()?;

    let reports = reports
        .get(position)
        .map(|children| {
            children
                .iter()
                .filter_map(|&child| assemble(child, slots, reports))
                .collect()
        })
        .unwrap_or_default();

    Some(OrgNode {
        collaborator,
        reports,
    })
}
