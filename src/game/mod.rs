mod grid;
pub use grid::*;
mod snapshot;
pub use snapshot::*;
