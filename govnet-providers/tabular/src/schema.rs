//! Explicit Arrow schemas for the governance CSV tables.
//!
//! Schemas are declared rather than inferred so malformed files fail loudly
//! at decode time. Balance cells are read as text because 1e18-scaled
//! reputation balances overflow every Arrow integer type a CSV sniffer
//! would pick.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema, SchemaRef};

pub(crate) const ORGANIZATIONS: &str = "organizations.csv";
pub(crate) const REPUTATION_HOLDERS: &str = "reputation_holders.csv";
pub(crate) const PROPOSALS: &str = "proposals.csv";
pub(crate) const VOTES: &str = "votes.csv";
pub(crate) const STAKES: &str = "stakes.csv";

pub(crate) fn organizations() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, false),
    ]))
}

pub(crate) fn reputation_holders() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("address", DataType::Utf8, false),
        Field::new("balance", DataType::Utf8, false),
        Field::new("createdAt", DataType::Int64, false),
        Field::new("dao", DataType::Utf8, false),
    ]))
}

pub(crate) fn proposals() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("proposer", DataType::Utf8, false),
        Field::new("createdAt", DataType::Int64, false),
        Field::new("dao", DataType::Utf8, false),
    ]))
}

pub(crate) fn votes() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("voter", DataType::Utf8, false),
        Field::new("proposal", DataType::Utf8, false),
        Field::new("outcome", DataType::Utf8, false),
        Field::new("createdAt", DataType::Int64, false),
        Field::new("dao", DataType::Utf8, false),
    ]))
}

pub(crate) fn stakes() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("staker", DataType::Utf8, false),
        Field::new("proposal", DataType::Utf8, false),
        Field::new("outcome", DataType::Utf8, false),
        Field::new("createdAt", DataType::Int64, false),
        Field::new("dao", DataType::Utf8, false),
    ]))
}
