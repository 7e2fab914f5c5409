//! Decision variables of a squad model.
//!
//! Allocation order is fixed (selection, positioning, on-pitch, raw and gated
//! chemistry, then group tiers and bucket indicators per group kind) so two
//! compilations of identical input yield identical variable ids.

use sbcforge_core::{GroupKind, RosterIndex};

use crate::model::{Model, VarId};

/// Number of chemistry buckets per group.
pub const BUCKETS: usize = 4;

/// Highest chemistry value of a candidate or group tier.
pub const MAX_CHEMISTRY: i64 = 3;

/// Variable handles for one roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variables {
    pub select: Vec<VarId>,
    pub position: Vec<VarId>,
    pub on_pitch: Vec<VarId>,
    pub raw_chem: Vec<VarId>,
    pub chem: Vec<VarId>,
    tiers: [Vec<VarId>; 3],
    buckets: [Vec<[VarId; BUCKETS]>; 3],
}

impl Variables {
    /// Allocates every candidate and group variable into `model`.
    pub fn allocate(model: &mut Model, index: &RosterIndex) -> Self {
        let n = index.candidate_count();
        let select = (0..n).map(|i| model.new_bool(format!("select{i}"))).collect();
        let position = (0..n).map(|i| model.new_bool(format!("position{i}"))).collect();
        let on_pitch = (0..n).map(|i| model.new_bool(format!("on_pitch{i}"))).collect();
        let raw_chem = (0..n)
            .map(|i| model.new_int(format!("raw_chem{i}"), 0, MAX_CHEMISTRY))
            .collect();
        let chem = (0..n)
            .map(|i| model.new_int(format!("chem{i}"), 0, MAX_CHEMISTRY))
            .collect();

        let tiers = GroupKind::ALL.map(|kind| {
            (0..index.group(kind).len())
                .map(|g| model.new_int(format!("tier_{kind}{g}"), 0, MAX_CHEMISTRY))
                .collect::<Vec<_>>()
        });
        let buckets = GroupKind::ALL.map(|kind| {
            (0..index.group(kind).len())
                .map(|g| std::array::from_fn(|k| model.new_bool(format!("bucket_{kind}{g}_{k}"))))
                .collect::<Vec<_>>()
        });

        Self {
            select,
            position,
            on_pitch,
            raw_chem,
            chem,
            tiers,
            buckets,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.select.len()
    }

    /// Tier variables of every group of `kind`, by group id.
    pub fn tiers(&self, kind: GroupKind) -> &[VarId] {
        &self.tiers[slot(kind)]
    }

    pub fn tier(&self, kind: GroupKind, group: usize) -> VarId {
        self.tiers[slot(kind)][group]
    }

    /// Bucket indicators of one group, lowest bucket first.
    pub fn buckets(&self, kind: GroupKind, group: usize) -> [VarId; BUCKETS] {
        self.buckets[slot(kind)][group]
    }
}

fn slot(kind: GroupKind) -> usize {
    match kind {
        GroupKind::Club => 0,
        GroupKind::League => 1,
        GroupKind::Nation => 2,
    }
}
