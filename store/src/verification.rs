//! Verification receipt storage trait.
//!
//! Receipts are what the connect flow hands back to the UI: a record that a
//! wallet proved control of its address (`Connected`) or additionally
//! confirmed its holdings (`Verified`). External components only read
//! these summaries.

use crate::StoreError;
use froglink_types::{BtcAddress, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Connected,
    Verified,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub address: BtcAddress,
    pub status: VerificationStatus,
    /// Frog numbers confirmed at `Verified`; empty for plain connects.
    pub frog_numbers: Vec<u32>,
    pub created_at: Timestamp,
}

pub trait VerificationStore {
    /// Append a verification receipt.
    fn put_verification(&self, record: &VerificationRecord) -> Result<(), StoreError>;

    /// Most recent receipt for an address, if any.
    fn latest_verification(
        &self,
        address: &BtcAddress,
    ) -> Result<Option<VerificationRecord>, StoreError>;
}
