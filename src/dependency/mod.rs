//! Call graph construction and cycle detection.
//!
//! Parameter and return types are only known at call sites, so a function can
//! only be analysed once every function it calls can be. A cycle in the call
//! graph has no such starting point, which makes recursion of any kind illegal:
//!
//! - Edges for direct calls and function pointers, found syntactically
//! - Every elementary cycle reported as one diagnostic

pub mod dependency_detector;
pub mod dependency_graph;
