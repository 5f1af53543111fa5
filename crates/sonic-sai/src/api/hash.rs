//! Safe wrapper for SAI hash API.

use super::{create_typed, remove_typed, SaiApi};
use crate::attr::SaiAttribute;
use crate::error::SaiResult;
use crate::types::{HashOid, SwitchOid};

/// Safe wrapper for SAI hash API.
pub struct HashApi<'a, A: SaiApi + ?Sized> {
    api: &'a A,
    switch_id: SwitchOid,
}

impl<'a, A: SaiApi + ?Sized> HashApi<'a, A> {
    pub fn new(api: &'a A, switch_id: SwitchOid) -> Self {
        Self { api, switch_id }
    }

    /// Creates a hash object from native fields and/or UDF groups.
    pub fn create_hash(&self, attrs: &[SaiAttribute]) -> SaiResult<HashOid> {
        create_typed(self.api, self.switch_id, attrs)
    }

    pub fn remove_hash(&self, oid: HashOid) -> SaiResult<()> {
        remove_typed(self.api, oid)
    }
}
