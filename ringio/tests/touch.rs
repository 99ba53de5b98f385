// Aggregator for touch integration tests located in `tests/touch/`.
// Cargo treats each top-level file in `tests/` as an integration test crate;
// we include the per-topic files as submodules to keep the directory layout
// neat while still allowing `cargo test` to discover them.

#[path = "touch/stream_test.rs"]
mod stream_test;

#[path = "touch/surface_test.rs"]
mod surface_test;
