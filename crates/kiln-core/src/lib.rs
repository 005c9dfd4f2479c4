//! Core value types for the kiln workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! [`Element`] capability trait that grid cell types satisfy, the inline
//! fixed-size [`Vector`] value type, and the [`StepId`] counter.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod id;
pub mod vector;

pub use element::Element;
pub use id::StepId;
pub use vector::{Vec2, Vec3, Vector};
