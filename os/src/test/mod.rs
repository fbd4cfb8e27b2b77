//! Test support
//!
//! Host-run unit tests use [`kassert!`](crate::kassert) and
//! [`test_case!`](crate::test_case) instead of bare `assert!`: a failed `kassert!`
//! is recorded and the test keeps running, so one run reports every broken
//! condition in the case. `test_case!` fails the test at the end if anything was
//! recorded.
