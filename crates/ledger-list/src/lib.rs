//! # ledger-list
//!
//! Controllers for the valve list and ledger detail pages:
//! - [`SelectionController`] keeps row and header checkboxes consistent
//! - [`BatchActionRunner`] confirms and dispatches approve/reject/delete/export/submit
//! - [`FilterDropdown`] rewrites a column's query parameters

pub mod batch;
pub mod error;
pub mod filter;
pub mod selection;

pub use batch::{
    BatchActionRunner, BatchOutcome, BatchTarget, DispatchMode, LedgerDecision, PageLayout,
};
pub use error::ListError;
pub use filter::{FilterCatalog, FilterDropdown};
pub use selection::{HeaderCheckbox, SelectionController, SelectionState, SelectionView};
