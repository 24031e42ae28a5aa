//! Plain-data model of an interactive merge session: two loaded inputs, the
//! active policy and its undo/redo history.

use log::debug;

use crate::dataset::{build_dataset, preview};
use crate::error::MergeError;
use crate::history::History;
use crate::model::{Dataset, Report};
use crate::policy::Policy;
use crate::report::{generate_report, preview_report};

/// Which input a session operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::First => "first",
            Side::Second => "second",
        }
    }
}

#[derive(Debug)]
pub struct MergeSession {
    datasets: [Option<Dataset>; 2],
    key_field: Option<String>,
    policy: Policy,
    history: History<Policy>,
}

impl Default for MergeSession {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl MergeSession {
    /// Start with `initial` as the first history entry.
    pub fn new(initial: Policy) -> Self {
        let mut history = History::new();
        history.append(initial.clone());
        Self {
            datasets: [None, None],
            key_field: None,
            policy: initial,
            history,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn key_field(&self) -> Option<&str> {
        self.key_field.as_deref()
    }

    pub fn dataset(&self, side: Side) -> Option<&Dataset> {
        self.datasets[side.index()].as_ref()
    }

    pub fn history(&self) -> &History<Policy> {
        &self.history
    }

    /// Build a dataset for `side` from a raw table.
    ///
    /// `fields` = `None` keeps every header column. Once a key is chosen,
    /// the other side must use the same key name. On error nothing changes.
    pub fn load<S: AsRef<str>>(
        &mut self,
        side: Side,
        raw: &[Vec<S>],
        key_field: &str,
        fields: Option<&[String]>,
    ) -> Result<(), MergeError> {
        if let Some(ref key) = self.key_field {
            let other_loaded = self.datasets[1 - side.index()].is_some();
            if other_loaded && key != key_field {
                return Err(MergeError::ConfigValidation(format!(
                    "key field '{key_field}' differs from the session key '{key}'"
                )));
            }
        }

        let included = match fields {
            Some(list) => list.to_vec(),
            None => crate::dataset::header_fields(raw),
        };
        let dataset = build_dataset(raw, key_field, &included)?;

        debug!("session: loaded {} side, {} record(s)", side.as_str(), dataset.len());
        self.key_field = Some(key_field.to_string());
        self.datasets[side.index()] = Some(dataset);
        self.sync_fields();
        Ok(())
    }

    /// Drop one side. With both sides empty the key is forgotten.
    pub fn clear(&mut self, side: Side) {
        self.datasets[side.index()] = None;
        if self.datasets.iter().all(Option::is_none) {
            self.key_field = None;
        }
        self.sync_fields();
    }

    /// Make `policy` active and record it in the history.
    ///
    /// Field lists always follow the loaded datasets, whatever `policy` carries.
    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
        self.sync_fields();
        self.history.append(self.policy.clone());
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the previous snapshot. Returns `false` when there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(policy) => self.restore(policy),
            None => false,
        }
    }

    /// Re-apply the next snapshot. Returns `false` when there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(policy) => self.restore(policy),
            None => false,
        }
    }

    /// Report for the active policy, or `None` until both sides are loaded.
    pub fn report(&self) -> Option<Report> {
        let key = self.key_field.as_deref()?;
        generate_report(self.dataset(Side::First), self.dataset(Side::Second), &self.policy, key)
    }

    /// Report under the active policy over the first `limit` records of
    /// each side.
    pub fn preview_report(&self, limit: usize) -> Option<Report> {
        let key = self.key_field.as_deref()?;
        preview_report(
            self.dataset(Side::First),
            self.dataset(Side::Second),
            &self.policy,
            key,
            limit,
        )
    }

    /// A small sample of one side.
    pub fn preview(&self, side: Side, limit: usize) -> Option<Dataset> {
        self.dataset(side).map(|ds| preview(ds, limit))
    }

    fn restore(&mut self, policy: Policy) -> bool {
        self.policy = policy;
        self.sync_fields();
        true
    }

    fn sync_fields(&mut self) {
        self.policy.fields = match (&self.datasets[0], &self.datasets[1]) {
            (Some(a), Some(b)) => Some([a.fields().to_vec(), b.fields().to_vec()]),
            _ => None,
        };
    }
}
