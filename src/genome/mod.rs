//! Gene encoding
//!
//! This module provides the bounded gene interval and the named gene vector.

pub mod bounds;
pub mod gene_vector;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::gene_vector::*;
}
