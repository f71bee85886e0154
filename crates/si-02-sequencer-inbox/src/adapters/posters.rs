//! Static poster allow-list.

use crate::ports::outbound::BatchPosterRegistry;
use parking_lot::RwLock;
use shared_types::entities::Address;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct StaticPosterRegistry {
    posters: RwLock<HashSet<Address>>,
}

impl StaticPosterRegistry {
    pub fn new(posters: impl IntoIterator<Item = Address>) -> Self {
        Self {
            posters: RwLock::new(posters.into_iter().collect()),
        }
    }

    pub fn set_batch_poster(&self, account: Address, allowed: bool) {
        let mut posters = self.posters.write();
        if allowed {
            posters.insert(account);
        } else {
            posters.remove(&account);
        }
    }
}

impl BatchPosterRegistry for StaticPosterRegistry {
    fn is_batch_poster(&self, account: &Address) -> bool {
        self.posters.read().contains(account)
    }
}
