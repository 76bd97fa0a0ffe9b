//! Test fixtures for dialogc development.
//!
//! Fixtures are plain JSON documents and row vectors rather than
//! compiler types, so every crate in the workspace can use them as a
//! dev-dependency without a dependency cycle.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
