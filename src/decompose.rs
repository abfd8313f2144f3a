//! Cohort decomposition.
//!
//! Splits each solved mega-group (everyone starting at the same unit) into
//! `g[t]` cohorts, distributing each role's people as evenly as possible.
//!
//! # Algorithm
//! For a role with `n` people at a slot with `c` cohorts:
//! `c - n % c` buckets of `n / c` people, followed by `n % c` buckets of
//! `n / c + 1`. People are taken in request order, so the mapping is
//! deterministic for a given input.

use std::collections::BTreeMap;

use crate::ilp::SolvedModel;
use crate::models::{Cohort, ScheduleSolution, SchedulingRequest, Unit};

/// Balanced bucket sizes for `n` items over `c` buckets.
///
/// Smaller buckets come first. Returns an empty list for `c == 0`.
pub fn bucket_sizes(n: usize, c: usize) -> Vec<usize> {
    if c == 0 {
        return Vec::new();
    }
    let base = n / c;
    let remainder = n % c;
    let mut sizes = vec![base; c - remainder];
    sizes.extend(std::iter::repeat(base + 1).take(remainder));
    sizes
}

/// Decomposes a solved model into cohorts, ordered by start unit.
///
/// # Panics
/// If a slot has assigned people but a group count of zero. The model
/// forbids this, so it can only mean the formulation itself is wrong.
pub fn decompose(request: &SchedulingRequest, solved: &SolvedModel) -> ScheduleSolution {
    let roles = &request.roles;
    let duration = request.meeting_duration;

    // slot -> per-role person indices, in request order
    let mut slots: BTreeMap<Unit, Vec<Vec<usize>>> = BTreeMap::new();
    for key in &solved.assigned {
        slots
            .entry(key.time)
            .or_insert_with(|| vec![Vec::new(); roles.len()])[key.role]
            .push(key.person);
    }

    let mut solution = ScheduleSolution::new();
    for (t, per_role) in slots {
        let count = solved.group_count(t) as usize;
        assert!(
            count > 0,
            "slot {t} has assigned people but a group count of zero"
        );

        let mut cohorts: Vec<Cohort> = (0..count).map(|_| Cohort::new(t, duration)).collect();
        for (role, people) in roles.iter().zip(&per_role) {
            let mut offset = 0;
            for (cohort, size) in cohorts.iter_mut().zip(bucket_sizes(people.len(), count)) {
                let ids = people[offset..offset + size]
                    .iter()
                    .map(|&p| role.people[p].id.clone())
                    .collect();
                cohort.members.insert(role.name.clone(), ids);
                offset += size;
            }
        }

        let formed = cohorts.len();
        cohorts.retain(|c| c.size() > 0);
        if cohorts.len() < formed {
            tracing::debug!(slot = t, dropped = formed - cohorts.len(), "dropped empty cohorts");
        }
        for cohort in cohorts {
            solution.add_cohort(cohort);
        }
    }

    tracing::info!(cohorts = solution.len(), "decomposed solution into cohorts");
    solution
}
