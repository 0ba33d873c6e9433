pub mod character;
pub mod entry;
pub mod reading;
pub mod resource;
pub mod settings;
pub mod solution;
pub mod solver;
pub mod unicode;

pub use entry::{Entry, EntryError, EntryKind};
pub use resource::{ResourceCache, ResourceError};
pub use solution::{Solution, SolutionPart};
pub use solver::{Solutions, Solver};
