//! Memory management module
//!
//! Address abstractions and the pieces the device map core is built from.
//!
//! # Components
//!
//! - [`address`]: Address and page number abstractions
//! - [`page_table`]: Page-table collaborator traits and a software page table
//! - [`kva`]: Kernel virtual address space allocation
//! - [`devmap`]: Static device map and dynamic device-memory mapper

pub mod address;
pub mod devmap;
pub mod kva;
pub mod page_table;
