use super::{MemAttr, PagingResult, VmProt};
use crate::mm::address::{Paddr, Vaddr};

/// Per-page kernel translation installer/remover
///
/// Implementations own their page-table format and TLB maintenance, and must be
/// safe to call from several CPUs at once.
pub trait DevicePageMapper: Sync {
    /// Installs one kernel translation `va -> pa` with memory type `attr`.
    ///
    /// Both addresses are page aligned. Protection is kernel read/write.
    fn kenter(&self, va: Vaddr, pa: Paddr, attr: MemAttr) -> PagingResult<()>;

    /// Removes the translation for the page at `va`.
    fn kremove(&self, va: Vaddr) -> PagingResult<()>;
}

/// One-shot bulk mapping primitive, available only during bootstrap
pub trait EarlyMapper {
    /// Maps `[pa, pa + size)` at `va` with the given attributes.
    ///
    /// Returns the number of bytes mapped.
    fn map_chunk(
        &mut self,
        va: Vaddr,
        pa: Paddr,
        size: usize,
        prot: VmProt,
        attr: MemAttr,
    ) -> PagingResult<usize>;
}
