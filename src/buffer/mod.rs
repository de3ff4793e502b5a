//! Internal buffer management for the splitter.
//!
//! This module provides the segmented accumulator that holds bytes read from
//! the source but not yet emitted. It is an implementation detail and not
//! part of the public API.

mod accumulator;

pub(crate) use accumulator::Accumulator;
