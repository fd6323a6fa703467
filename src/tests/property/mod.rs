//! Property-based tests
//!
//! Invariants that should hold for all inputs, checked with proptest.
//!
//! - `filter_props`: client-side catalog filtering
//!   - Blank filter is the identity
//!   - Result is an order-preserving subset
//!   - Filtering twice equals filtering once
//!   - Count line agrees with the result
//!
//! By default, proptest runs 256 cases per property. Override with
//! `PROPTEST_CASES`:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod filter_props;
