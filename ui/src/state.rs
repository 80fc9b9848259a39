use payloads::Renthouse;
use yewdux::prelude::*;

use crate::hooks::FetchState;

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Renthouses (managed by use_renthouses) ===
    pub renthouses: FetchState<Vec<Renthouse>>,
}

impl State {
    pub fn has_renthouses_loaded(&self) -> bool {
        self.renthouses.is_fetched()
    }

    pub fn get_renthouses(&self) -> Option<&Vec<Renthouse>> {
        self.renthouses.as_ref()
    }

    pub fn set_renthouses(&mut self, renthouses: Vec<Renthouse>) {
        self.renthouses = FetchState::Fetched(renthouses);
    }

    /// Forget the cached list so the next visit to the listing refetches.
    pub fn clear_renthouses(&mut self) {
        self.renthouses = FetchState::NotFetched;
    }
}
