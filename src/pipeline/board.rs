//! Bucketed lead board
//!
//! A `Board` maps bucket keys to ordered lead sequences. Order within a
//! bucket is display-only. Invariant: a given lead id appears in exactly
//! one bucket at all times, across every transition, including failed
//! ones after rollback.

use crate::pipeline::command::MoveCommand;
use crate::pipeline::lead::{Lead, LeadId};
use crate::utils::error::{CrmError, Result};
use serde::Serialize;

/// Mapping from bucket key to an ordered sequence of leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board<K> {
    buckets: Vec<(K, Vec<Lead>)>,
}

impl<K: Clone + Eq> Board<K> {
    /// Create a board with the given empty buckets, in display order.
    pub fn new<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self {
            buckets: keys.into_iter().map(|key| (key, Vec::new())).collect(),
        }
    }

    /// Bucket keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().map(|(key, _)| key)
    }

    /// Append an empty bucket if the key is not present yet.
    pub fn ensure_bucket(&mut self, key: K) {
        if !self.buckets.iter().any(|(k, _)| *k == key) {
            self.buckets.push((key, Vec::new()));
        }
    }

    /// Leads of one bucket, in display order.
    pub fn bucket(&self, key: &K) -> Option<&[Lead]> {
        self.buckets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, leads)| leads.as_slice())
    }

    /// The bucket currently holding a lead.
    pub fn bucket_of(&self, lead_id: LeadId) -> Option<&K> {
        self.buckets
            .iter()
            .find(|(_, leads)| leads.iter().any(|lead| lead.id == lead_id))
            .map(|(key, _)| key)
    }

    /// Look up a lead anywhere on the board.
    pub fn get(&self, lead_id: LeadId) -> Option<&Lead> {
        self.buckets
            .iter()
            .flat_map(|(_, leads)| leads.iter())
            .find(|lead| lead.id == lead_id)
    }

    /// Total number of leads across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, leads)| leads.len()).sum()
    }

    /// True iff no bucket holds a lead.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every lead id on the board, bucket by bucket.
    pub fn lead_ids(&self) -> Vec<LeadId> {
        self.buckets
            .iter()
            .flat_map(|(_, leads)| leads.iter().map(|lead| lead.id))
            .collect()
    }

    /// Place a lead into a bucket.
    ///
    /// Rejects ids already present anywhere on the board; the invariant
    /// is enforced at the door, not repaired later.
    pub fn insert(&mut self, key: &K, lead: Lead) -> Result<()> {
        if self.bucket_of(lead.id).is_some() {
            return Err(CrmError::bad_request(format!(
                "lead {} is already on the board",
                lead.id
            )));
        }

        let bucket = self
            .buckets
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, leads)| leads)
            .ok_or_else(|| CrmError::not_found("unknown bucket"))?;

        bucket.push(lead);
        Ok(())
    }

    /// Apply a move command: splice the lead out of its source bucket and
    /// append it to the target bucket. Returns the paired undo command.
    pub fn apply(&mut self, command: &MoveCommand<K>) -> Result<MoveCommand<K>> {
        if self.bucket(&command.to).is_none() {
            return Err(CrmError::not_found("unknown target bucket"));
        }

        let source = self
            .buckets
            .iter_mut()
            .find(|(k, _)| *k == command.from)
            .map(|(_, leads)| leads)
            .ok_or_else(|| CrmError::not_found("unknown source bucket"))?;

        let position = source
            .iter()
            .position(|lead| lead.id == command.lead_id)
            .ok_or_else(|| {
                CrmError::not_found(format!(
                    "lead {} is not in the source bucket",
                    command.lead_id
                ))
            })?;

        let lead = source.remove(position);

        let target = self
            .buckets
            .iter_mut()
            .find(|(k, _)| *k == command.to)
            .map(|(_, leads)| leads)
            .expect("target bucket checked above");
        target.push(lead);

        Ok(command.inverse())
    }

    /// Mutate one lead in place, wherever it sits.
    pub fn update_lead<F: FnOnce(&mut Lead)>(&mut self, lead_id: LeadId, f: F) -> Result<()> {
        let lead = self
            .buckets
            .iter_mut()
            .flat_map(|(_, leads)| leads.iter_mut())
            .find(|lead| lead.id == lead_id)
            .ok_or_else(|| CrmError::not_found(format!("lead {} is not on the board", lead_id)))?;
        f(lead);
        Ok(())
    }
}
