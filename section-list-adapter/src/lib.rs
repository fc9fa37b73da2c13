//! Engine binding and interaction helpers for the `section-list` crate.
//!
//! `section-list` translates sections into a flat sequence and back, but leaves windowing to
//! whatever implements its `FlatListEngine`. This crate provides one on top of the `virtualizer`
//! crate, plus the framework-neutral state adapters usually need around it:
//!
//! - [`VirtualizedEngine`]: grid rows packed by span, a pinned sticky header, threshold-based
//!   viewability, and immediate or animated `scroll_to_index`
//! - [`ScrollTween`] / [`Easing`]: the animation driven by `VirtualizedEngine::tick`
//! - [`IndexBar`]: labels, highlight, and press/drag handling for a fast-scroll sidebar
//!
//! Nothing here draws. Adapters feed UI events in and read positioned cells out.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod grid;
mod index_bar;
mod tween;


pub use engine::{EngineOptions, EstimateSize, VirtualizedEngine};
pub use grid::GridRow;
pub use index_bar::{ActiveSection, IndexBar, IndexBarState};
pub use tween::{Easing, ScrollTween};
