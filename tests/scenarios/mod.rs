//! End-to-end extraction scenarios
//!
//! Realistic Python sources run through `analyze` and checked against the
//! documented document shape.
