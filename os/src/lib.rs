//! Device memory map core
//!
//! Translation between physical device addresses and kernel virtual addresses:
//! a static device map installed once at bootstrap, plus an on-demand mapper for
//! arbitrary device-memory ranges.
//!
//! # Components
//!
//! - [`mm::devmap`]: static device map, table builder, dynamic device mapper
//! - [`mm::address`]: strong physical/virtual address types and ranges
//! - [`mm::page_table`]: page-table collaborator traits and a software page table
//! - [`mm::kva`]: kernel virtual address space allocator
//! - [`log`]: kernel-style `pr_*` logging
//! - [`sync`]: spin locks
#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

extern crate alloc;

#[macro_use]
pub mod log;
pub mod config;
pub mod mm;
pub mod sync;

#[cfg(test)]
#[macro_use]
pub mod test;
