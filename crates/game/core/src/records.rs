//! Scan records kept by a cloning console.
//!
//! Records are matched by subject id: scanning a subject that already has a
//! record refreshes it in place, otherwise a new record is appended. Cloning
//! consumes the record.

use crate::state::EntityId;

/// Damage totals captured by a scan.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageProfile {
    pub oxygen: f32,
    pub burn: f32,
    pub toxin: f32,
    pub brute: f32,
}

/// Subject lying in the scanner.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanSubject {
    /// Body being scanned.
    pub body: EntityId,
    /// Body the subject's mind is currently bound to.
    pub mind_body: EntityId,
    pub name: String,
    pub damage: DamageProfile,
}

/// Stored scan of one subject.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanRecord {
    /// Four-digit console id, assigned once when the record is created.
    pub scan_id: String,
    pub subject: EntityId,
    pub name: String,
    pub damage: DamageProfile,
}

impl ScanRecord {
    fn refresh(&mut self, subject: &ScanSubject) {
        self.subject = subject.body;
        self.name.clone_from(&subject.name);
        self.damage = subject.damage;
    }
}

/// Result of a successful scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    Created { scan_id: String },
    Updated { scan_id: String },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The scanned body is not the one the subject's mind inhabits.
    #[error("mind of {body} is bound to {mind_body}, refusing scan")]
    MindElsewhere { body: EntityId, mind_body: EntityId },

    #[error("no scan record with id {0}")]
    UnknownRecord(String),

    #[error("cloning pod is not ready")]
    PodUnavailable,

    #[error("mind refused cloning into {0}")]
    CloneRefused(EntityId),
}

/// Ordered list of scan records.
#[derive(Clone, Debug, Default)]
pub struct ScanRecords {
    records: Vec<ScanRecord>,
    next_scan_id: u16,
}

impl ScanRecords {
    const SCAN_ID_SPACE: u16 = 10_000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Scans a subject, updating its record or creating one.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MindElsewhere`] if the subject's mind is bound
    /// to a different body.
    pub fn scan(&mut self, subject: &ScanSubject) -> Result<ScanOutcome, RecordError> {
        if subject.mind_body != subject.body {
            return Err(RecordError::MindElsewhere {
                body: subject.body,
                mind_body: subject.mind_body,
            });
        }

        if let Some(record) = self.records.iter_mut().find(|r| r.subject == subject.body) {
            record.refresh(subject);
            return Ok(ScanOutcome::Updated {
                scan_id: record.scan_id.clone(),
            });
        }

        let scan_id = self.allocate_scan_id();
        self.records.push(ScanRecord {
            scan_id: scan_id.clone(),
            subject: subject.body,
            name: subject.name.clone(),
            damage: subject.damage,
        });
        Ok(ScanOutcome::Created { scan_id })
    }

    /// Removes and returns a record for cloning.
    ///
    /// The record is consumed only when the pod is ready and `confirm`
    /// accepts the subject; otherwise it stays in the list.
    ///
    /// # Errors
    ///
    /// [`RecordError::UnknownRecord`], [`RecordError::PodUnavailable`] or
    /// [`RecordError::CloneRefused`].
    pub fn take_for_clone(
        &mut self,
        scan_id: &str,
        pod_ready: bool,
        confirm: impl FnOnce(EntityId) -> bool,
    ) -> Result<ScanRecord, RecordError> {
        let index = self
            .records
            .iter()
            .position(|r| r.scan_id == scan_id)
            .ok_or_else(|| RecordError::UnknownRecord(scan_id.to_owned()))?;

        if !pod_ready {
            return Err(RecordError::PodUnavailable);
        }

        let subject = self.records[index].subject;
        if !confirm(subject) {
            return Err(RecordError::CloneRefused(subject));
        }

        Ok(self.records.remove(index))
    }

    pub fn get(&self, scan_id: &str) -> Option<&ScanRecord> {
        self.records.iter().find(|r| r.scan_id == scan_id)
    }

    pub fn for_subject(&self, subject: EntityId) -> Option<&ScanRecord> {
        self.records.iter().find(|r| r.subject == subject)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn allocate_scan_id(&mut self) -> String {
        // Skip ids still held by a stored record after wrap-around. With the
        // whole id space taken, ids are shared.
        let mut candidate = format!("{:04}", self.next_scan_id);
        for _ in 0..Self::SCAN_ID_SPACE {
            candidate = format!("{:04}", self.next_scan_id);
            self.next_scan_id = (self.next_scan_id + 1) % Self::SCAN_ID_SPACE;
            if self.get(&candidate).is_none() {
                break;
            }
        }
        candidate
    }
}
