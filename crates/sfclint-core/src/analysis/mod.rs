//! Graph construction over one service template: the base connectivity
//! matrix shared by the whole run, and one directed matrix per forwarding
//! path. Loop search and matrix comparison live in `sfclint-matrix`; this
//! module owns the extraction from node templates.

pub mod connectivity;
pub mod paths;

pub use connectivity::{ConnectionPoint, Connectivity};
pub use paths::ForwardingPath;
