pub mod use_fetch;
pub mod use_push_route;
pub mod use_renthouses;
pub mod use_title;

pub use use_fetch::{FetchHookReturn, use_fetch, use_fetch_with_cache};
pub use use_push_route::{use_push_editor, use_push_route};
pub use use_renthouses::use_renthouses;
pub use use_title::use_title;

/// Distinguishes "not fetched yet" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::NotFetched => None,
        }
    }
}
