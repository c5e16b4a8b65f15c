//! In-memory storage layer

pub mod collection;

pub use collection::{Collection, Record};

use crate::types::Show;

/// The `shows` resource collection
pub type ShowStore = Collection<Show>;
