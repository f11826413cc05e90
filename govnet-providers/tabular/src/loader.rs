//! CSV table loading and per-organization filtering.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow_array::{Array, Int64Array, RecordBatch, StringArray};
use arrow_csv::ReaderBuilder;
use arrow_schema::SchemaRef;

use govnet_core::{
    GovernanceRecords, Outcome, Participant, ProposalRecord, Roster, StakeRecord, VoteRecord,
};

use crate::errors::TableError;
use crate::schema;
use crate::window::TimeWindow;

/// Loads governance CSV tables from a data directory.
///
/// Every accessor filters to one organization identifier and optionally to
/// a [`TimeWindow`], so the core receives pre-filtered, single-organization
/// input as its contract requires.
///
/// # Examples
/// ```no_run
/// use govnet_providers_tabular::TabularLoader;
///
/// let loader = TabularLoader::new("data/raw");
/// let dao = loader.resolve_organization("dxDAO")?;
/// let roster = loader.roster(&dao, None)?;
/// println!("{} reputation holders", roster.len());
/// # Ok::<(), govnet_providers_tabular::TableError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TabularLoader {
    root: PathBuf,
}

impl TabularLoader {
    /// Creates a loader rooted at the directory holding the CSV tables.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the data directory the loader reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an organization name to its table identifier.
    ///
    /// # Errors
    /// Returns [`TableError::UnknownOrganization`] when no row matches, or
    /// a decode error for malformed tables.
    pub fn resolve_organization(&self, name: &str) -> Result<String, TableError> {
        let batches = self.read(schema::ORGANIZATIONS, schema::organizations())?;
        for batch in &batches {
            let ids = string_column(batch, schema::ORGANIZATIONS, "id")?;
            let names = string_column(batch, schema::ORGANIZATIONS, "name")?;
            for row in 0..batch.num_rows() {
                if names.value(row) == name {
                    return Ok(ids.value(row).to_owned());
                }
            }
        }
        Err(TableError::UnknownOrganization {
            name: name.to_owned(),
        })
    }

    /// Loads the reputation-holder roster of one organization.
    ///
    /// # Errors
    /// Returns [`TableError::InvalidBalance`] for balance cells that do not
    /// parse as unsigned integers, or I/O and decode errors.
    pub fn roster(&self, dao: &str, window: Option<TimeWindow>) -> Result<Roster, TableError> {
        let table = schema::REPUTATION_HOLDERS;
        let batches = self.read(table, schema::reputation_holders())?;
        let mut participants = Vec::new();
        let mut offset = 0_usize;
        for batch in &batches {
            let addresses = string_column(batch, table, "address")?;
            let balances = string_column(batch, table, "balance")?;
            let created = int_column(batch, table, "createdAt")?;
            let daos = string_column(batch, table, "dao")?;
            for row in 0..batch.num_rows() {
                if daos.value(row) != dao || !admits(window, created.value(row)) {
                    continue;
                }
                let raw = balances.value(row);
                let balance =
                    raw.trim()
                        .parse::<u128>()
                        .map_err(|_| TableError::InvalidBalance {
                            table,
                            row: offset + row,
                            value: raw.to_owned(),
                        })?;
                participants.push(Participant {
                    address: addresses.value(row).to_owned(),
                    balance,
                });
            }
            offset += batch.num_rows();
        }
        Ok(Roster::new(participants))
    }

    /// Loads one organization's vote records.
    ///
    /// # Errors
    /// Returns [`TableError::UnknownOutcome`] for unexpected outcome labels,
    /// or I/O and decode errors.
    pub fn votes(&self, dao: &str, window: Option<TimeWindow>) -> Result<Vec<VoteRecord>, TableError> {
        let table = schema::VOTES;
        let batches = self.read(table, schema::votes())?;
        let mut records = Vec::new();
        let mut offset = 0_usize;
        for batch in &batches {
            let voters = string_column(batch, table, "voter")?;
            let proposals = string_column(batch, table, "proposal")?;
            let outcomes = string_column(batch, table, "outcome")?;
            let created = int_column(batch, table, "createdAt")?;
            let daos = string_column(batch, table, "dao")?;
            for row in 0..batch.num_rows() {
                if daos.value(row) != dao || !admits(window, created.value(row)) {
                    continue;
                }
                records.push(VoteRecord {
                    voter: voters.value(row).to_owned(),
                    proposal: proposals.value(row).to_owned(),
                    outcome: parse_outcome(table, offset + row, outcomes.value(row))?,
                    timestamp: created.value(row),
                });
            }
            offset += batch.num_rows();
        }
        Ok(records)
    }

    /// Loads one organization's stake records.
    ///
    /// # Errors
    /// Returns [`TableError::UnknownOutcome`] for unexpected outcome labels,
    /// or I/O and decode errors.
    pub fn stakes(&self, dao: &str, window: Option<TimeWindow>) -> Result<Vec<StakeRecord>, TableError> {
        let table = schema::STAKES;
        let batches = self.read(table, schema::stakes())?;
        let mut records = Vec::new();
        let mut offset = 0_usize;
        for batch in &batches {
            let stakers = string_column(batch, table, "staker")?;
            let proposals = string_column(batch, table, "proposal")?;
            let outcomes = string_column(batch, table, "outcome")?;
            let created = int_column(batch, table, "createdAt")?;
            let daos = string_column(batch, table, "dao")?;
            for row in 0..batch.num_rows() {
                if daos.value(row) != dao || !admits(window, created.value(row)) {
                    continue;
                }
                records.push(StakeRecord {
                    staker: stakers.value(row).to_owned(),
                    proposal: proposals.value(row).to_owned(),
                    outcome: parse_outcome(table, offset + row, outcomes.value(row))?,
                    timestamp: created.value(row),
                });
            }
            offset += batch.num_rows();
        }
        Ok(records)
    }

    /// Loads one organization's proposal records.
    ///
    /// # Errors
    /// Returns I/O and decode errors.
    pub fn proposals(
        &self,
        dao: &str,
        window: Option<TimeWindow>,
    ) -> Result<Vec<ProposalRecord>, TableError> {
        let table = schema::PROPOSALS;
        let batches = self.read(table, schema::proposals())?;
        let mut records = Vec::new();
        for batch in &batches {
            let ids = string_column(batch, table, "id")?;
            let proposers = string_column(batch, table, "proposer")?;
            let created = int_column(batch, table, "createdAt")?;
            let daos = string_column(batch, table, "dao")?;
            for row in 0..batch.num_rows() {
                if daos.value(row) != dao || !admits(window, created.value(row)) {
                    continue;
                }
                records.push(ProposalRecord {
                    id: ids.value(row).to_owned(),
                    proposer: proposers.value(row).to_owned(),
                    timestamp: created.value(row),
                });
            }
        }
        Ok(records)
    }

    /// Loads every event table at once.
    ///
    /// # Errors
    /// Propagates the first error from the underlying table loads.
    pub fn records(
        &self,
        dao: &str,
        window: Option<TimeWindow>,
    ) -> Result<GovernanceRecords, TableError> {
        Ok(GovernanceRecords {
            proposals: self.proposals(dao, window)?,
            votes: self.votes(dao, window)?,
            stakes: self.stakes(dao, window)?,
        })
    }

    fn read(
        &self,
        file_name: &'static str,
        schema: SchemaRef,
    ) -> Result<Vec<RecordBatch>, TableError> {
        let path = self.root.join(file_name);
        let file = File::open(&path).map_err(|source| TableError::Io {
            path: path.clone(),
            source,
        })?;
        let reader = ReaderBuilder::new(schema)
            .with_header(true)
            .build(file)
            .map_err(|source| TableError::Decode {
                path: path.clone(),
                source,
            })?;
        let mut batches = Vec::new();
        for batch in reader {
            batches.push(batch.map_err(|source| TableError::Decode {
                path: path.clone(),
                source,
            })?);
        }
        Ok(batches)
    }
}

fn admits(window: Option<TimeWindow>, timestamp: i64) -> bool {
    window.is_none_or(|window| window.admits(timestamp))
}

fn parse_outcome(table: &'static str, row: usize, label: &str) -> Result<Outcome, TableError> {
    Outcome::parse(label).ok_or_else(|| TableError::UnknownOutcome {
        table,
        row,
        label: label.to_owned(),
    })
}

fn string_column<'a>(
    batch: &'a RecordBatch,
    table: &'static str,
    column: &'static str,
) -> Result<&'a StringArray, TableError> {
    batch
        .column_by_name(column)
        .ok_or(TableError::MissingColumn { table, column })?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or(TableError::InvalidColumnType { table, column })
}

fn int_column<'a>(
    batch: &'a RecordBatch,
    table: &'static str,
    column: &'static str,
) -> Result<&'a Int64Array, TableError> {
    batch
        .column_by_name(column)
        .ok_or(TableError::MissingColumn { table, column })?
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or(TableError::InvalidColumnType { table, column })
}
