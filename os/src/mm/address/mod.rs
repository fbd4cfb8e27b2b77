//! Address module
//!
//! Strong types for physical and virtual addresses so the two can never be
//! mixed up at a call site, plus page numbers and half-open ranges.
//!
//! # Components
//!
//! - [`Address`]: Trait shared by address types
//! - [`Paddr`]: Physical address type
//! - [`Vaddr`]: Virtual address type
//! - [`AddressRange`]: Half-open range of addresses with containment checks
//! - [`PageNum`]: Trait for page numbers
//! - [`Ppn`]: Physical page number
//! - [`Vpn`]: Virtual page number
//! - [`PageNumRange`]: Iterable range of page numbers
//!
//! # Operations
//!
//! - [`UsizeConvert`]: Convert between types and usize
//! - [`AlignOps`]: Address alignment operations
//! - [`page_span`]: Page-rounded span covering an unaligned byte range

mod address;
mod operations;
mod page_num;

pub use address::{Address, AddressRange, Paddr, PaddrRange, Vaddr, VaddrRange, page_span};
pub use operations::{AlignOps, UsizeConvert};
pub use page_num::{PageNum, PageNumRange, Ppn, PpnRange, Vpn, VpnRange};
