//! Recognition of simple archive layouts.
//!
//! The [`LayoutMatcher`] inspects the immediate children of one node, the
//! [`BaseLocator`] walks down single-child wrapper directories until the
//! matcher accepts a node, and the [`Normalizer`] turns that node into an
//! owned tree ready for installation.

mod locator;
mod markers;
mod matcher;
mod normalizer;

pub use locator::{BaseLocator, LocatedBase};
pub use markers::{MarkerSet, TopLevelMarkers};
pub use matcher::{LayoutKind, LayoutMatcher};
pub use normalizer::{NormalizeError, Normalizer};
