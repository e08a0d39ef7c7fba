//! Loading/error/data state for views that fetch, plus a generation guard
//! so a late response never lands in a view that has moved on.

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    /// User-facing message.
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> From<Result<T, CatalogError>> for LoadState<T> {
    fn from(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(v) => Self::Loaded(v),
            Err(e) => Self::Failed(e.user_message()),
        }
    }
}

/// Handed out by [`FetchSlot::begin`]; only the newest one may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    state: LoadState<T>,
    generation: u64,
    disposed: bool,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
            disposed: false,
        }
    }

    /// Start a fetch. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.disposed = false;
        self.state = LoadState::Loading;
        FetchTicket(self.generation)
    }

    /// Apply a result. Returns `false` (and drops it) when the ticket is
    /// stale or the slot was disposed.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<T, CatalogError>) -> bool {
        if self.disposed || ticket.0 != self.generation {
            return false;
        }
        self.state = result.into();
        true
    }

    /// The owning view went away; outstanding tickets are void.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.generation += 1;
        self.state = LoadState::Idle;
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LoadState<T> {
        &mut self.state
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        !self.disposed && ticket.0 == self.generation
    }
}
