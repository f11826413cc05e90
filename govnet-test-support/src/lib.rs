//! Shared test utilities used across govnet crates.
//!
//! Provides a canned on-disk CSV corpus matching the tabular loader's
//! documented layout, so provider and CLI tests exercise real files without
//! each inventing their own fixtures.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the sample organization the corpus describes.
pub const DAO_NAME: &str = "alphadao";

/// Identifier of the sample organization inside the tables.
pub const DAO_ID: &str = "dao-1";

/// Cutoff date (dd/mm/yyyy) that keeps only the corpus's early records.
///
/// Everything attached to `prop-1` falls before it; everything attached to
/// `prop-2` falls after it.
pub const EARLY_WINDOW: &str = "01/04/2021";

/// Handle to a written sample corpus.
#[derive(Clone, Debug)]
pub struct SampleCorpus {
    root: PathBuf,
}

impl SampleCorpus {
    /// Returns the directory containing the CSV tables.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Writes the sample governance corpus into `dir`.
///
/// The corpus carries two organizations so loader filtering is observable:
/// `alphadao` (three reputation holders, two proposals, one non-member
/// staker `0xzz99`) and a one-member `betadao` that must never leak into
/// `alphadao` results.
///
/// # Errors
/// Propagates any [`io::Error`] raised while creating files.
///
/// # Examples
/// ```
/// use govnet_test_support::{DAO_NAME, write_sample_corpus};
///
/// let dir = tempfile::tempdir()?;
/// let corpus = write_sample_corpus(dir.path())?;
/// assert!(corpus.root().join("votes.csv").exists());
/// assert_eq!(DAO_NAME, "alphadao");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_sample_corpus(dir: &Path) -> io::Result<SampleCorpus> {
    fs::create_dir_all(dir)?;

    fs::write(
        dir.join("organizations.csv"),
        "id,name\n\
         dao-1,alphadao\n\
         dao-2,betadao\n",
    )?;

    fs::write(
        dir.join("reputation_holders.csv"),
        "address,balance,createdAt,dao\n\
         0xaa01,100,1609459200,dao-1\n\
         0xaa02,200,1609459200,dao-1\n\
         0xaa03,300,1609459200,dao-1\n\
         0xbb01,50,1609459200,dao-2\n",
    )?;

    fs::write(
        dir.join("proposals.csv"),
        "id,proposer,createdAt,dao\n\
         prop-1,0xaa03,1609459200,dao-1\n\
         prop-2,0xaa01,1619000000,dao-1\n\
         prop-9,0xbb01,1609459200,dao-2\n",
    )?;

    fs::write(
        dir.join("votes.csv"),
        "voter,proposal,outcome,createdAt,dao\n\
         0xaa01,prop-1,Pass,1610000000,dao-1\n\
         0xaa02,prop-1,Pass,1610000100,dao-1\n\
         0xaa03,prop-1,Fail,1610000200,dao-1\n\
         0xaa01,prop-2,Pass,1620000000,dao-1\n\
         0xaa02,prop-2,Pass,1620000100,dao-1\n\
         0xbb01,prop-9,Pass,1610000000,dao-2\n",
    )?;

    fs::write(
        dir.join("stakes.csv"),
        "staker,proposal,outcome,createdAt,dao\n\
         0xaa01,prop-1,Pass,1609900000,dao-1\n\
         0xzz99,prop-1,Pass,1609900100,dao-1\n\
         0xaa02,prop-1,Fail,1609900200,dao-1\n\
         0xzz99,prop-2,Pass,1619900000,dao-1\n\
         0xbb01,prop-9,Pass,1609900000,dao-2\n",
    )?;

    Ok(SampleCorpus {
        root: dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_writes_all_five_tables() {
        let dir = tempfile::tempdir().expect("temp dir");
        let corpus = write_sample_corpus(dir.path()).expect("corpus must write");
        for table in [
            "organizations.csv",
            "reputation_holders.csv",
            "proposals.csv",
            "votes.csv",
            "stakes.csv",
        ] {
            assert!(corpus.root().join(table).exists(), "missing {table}");
        }
    }
}
