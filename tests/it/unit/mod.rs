//! Unit tests for individual components.
//!
//! Each test exercises one piece through the public API: camera math, hit
//! testing, document rules, z-order and the saved JSON shape.

mod camera_tests;
mod document_tests;
