use super::operations::{AlignOps, UsizeConvert};
use crate::config::PAGE_SIZE;
use core::fmt;
use core::ops::{Add, Sub};

/// Trait shared by physical and virtual addresses
pub trait Address:
    AlignOps
    + UsizeConvert
    + Add<usize, Output = Self>
    + Sub<usize, Output = Self>
    + Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Eq
    + Ord
    + fmt::Debug
{
    /// Whether this is address zero
    fn is_null(self) -> bool {
        self.as_usize() == 0
    }

    /// Address zero
    fn null() -> Self {
        Self::from_usize(0)
    }

    /// Byte offset of this address within its page
    fn page_offset(self) -> usize {
        self.as_usize() & (PAGE_SIZE - 1)
    }

    /// `self + offset`, or `None` if it would wrap the address space
    fn checked_add(self, offset: usize) -> Option<Self> {
        self.as_usize().checked_add(offset).map(Self::from_usize)
    }

    /// Distance in bytes from `base` up to `self`
    fn offset_from(self, base: Self) -> usize {
        debug_assert!(base <= self, "offset_from: {:?} is below {:?}", self, base);
        self.as_usize() - base.as_usize()
    }
}

/// Implements the address traits and constructors for a `usize` newtype
#[macro_export]
macro_rules! impl_address {
    ($type:ident) => {
        impl $crate::mm::address::UsizeConvert for $type {
            fn as_usize(&self) -> usize {
                self.0
            }
            fn from_usize(value: usize) -> Self {
                Self(value)
            }
        }

        $crate::impl_calc_ops!($type);
        impl $crate::mm::address::AlignOps for $type {}
        impl $crate::mm::address::Address for $type {}

        impl $type {
            /// Wraps a raw address
            pub const fn new(addr: usize) -> Self {
                Self(addr)
            }

            /// Raw value, usable in `const` contexts
            pub const fn raw(self) -> usize {
                self.0
            }
        }

        impl core::fmt::Debug for $type {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!(stringify!($type), "({:#x})"), self.0)
            }
        }

        impl core::fmt::LowerHex for $type {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::LowerHex::fmt(&self.0, f)
            }
        }
    };
}

/// Physical address
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Paddr(usize);
impl_address!(Paddr);

/// Virtual address
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Vaddr(usize);
impl_address!(Vaddr);

impl Vaddr {
    /// Address of a pointer
    pub fn from_ptr<T>(p: *const T) -> Self {
        Self(p as usize)
    }

    /// Address as a const pointer
    pub fn as_ptr<T>(self) -> *const T {
        self.0 as *const T
    }

    /// Address as a mut pointer
    ///
    /// The caller must ensure that the address is mapped and valid for type T
    /// before dereferencing the pointer
    pub fn as_mut_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }
}

/// Half-open range `[start, end)` of addresses
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AddressRange<T: Address> {
    start: T,
    end: T,
}

/// Range of physical addresses
pub type PaddrRange = AddressRange<Paddr>;
/// Range of virtual addresses
pub type VaddrRange = AddressRange<Vaddr>;

impl<T: Address> AddressRange<T> {
    /// `[start, end)`; `start` must not exceed `end`
    pub fn new(start: T, end: T) -> Self {
        debug_assert!(start <= end, "AddressRange::new: {:?} > {:?}", start, end);
        Self { start, end }
    }

    /// `[start, start + len)`, or `None` if the end wraps the address space
    pub fn from_start_len(start: T, len: usize) -> Option<Self> {
        start.checked_add(len).map(|end| Self { start, end })
    }

    /// Inclusive start
    pub fn start(&self) -> T {
        self.start
    }

    /// Exclusive end
    pub fn end(&self) -> T {
        self.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset_from(self.start)
    }

    /// Whether the range holds nothing
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `addr` lies in the range
    pub fn contains(&self, addr: T) -> bool {
        self.start <= addr && addr < self.end
    }

    /// Full containment: every byte of `other` lies inside `self`.
    ///
    /// Partial overlap is `false`. An empty `other` is contained when its
    /// position lies within `[start, end]`.
    pub fn contains_range(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two ranges share at least one byte
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl<T: Address> fmt::Debug for AddressRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}, {:#x})", self.start.as_usize(), self.end.as_usize())
    }
}

/// Page-rounded span covering `[addr, addr + size)`.
///
/// Returns the page-aligned range together with the sub-page offset of `addr`,
/// so that `span.start() + offset == addr`. `None` if any of the arithmetic
/// wraps the address space.
pub fn page_span<T: Address>(addr: T, size: usize) -> Option<(AddressRange<T>, usize)> {
    let offset = addr.page_offset();
    let base = addr.align_down_to_page();
    let rounded = size.checked_add(offset)?.align_up_to_page()?;
    let span = AddressRange::from_start_len(base, rounded)?;
    Some((span, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kassert, test_case};

    fn prange(start: usize, end: usize) -> PaddrRange {
        AddressRange::new(Paddr::new(start), Paddr::new(end))
    }

    test_case!(test_contains_range_full_only, {
        let entry = prange(0x1000_0000, 0x1000_2000);

        kassert!(entry.contains_range(&prange(0x1000_0000, 0x1000_2000)));
        kassert!(entry.contains_range(&prange(0x1000_0100, 0x1000_0200)));
        // 部分重叠不算包含
        kassert!(!entry.contains_range(&prange(0x0fff_f000, 0x1000_1000)));
        kassert!(!entry.contains_range(&prange(0x1000_1000, 0x1000_3000)));
        kassert!(entry.overlaps(&prange(0x1000_1000, 0x1000_3000)));
        kassert!(!entry.overlaps(&prange(0x1000_2000, 0x1000_3000)));
    });

    test_case!(test_from_start_len_overflow, {
        kassert!(PaddrRange::from_start_len(Paddr::new(usize::MAX - 0xff), 0x100).is_none());
        let r = PaddrRange::from_start_len(Paddr::new(0x2000), 0x1000);
        kassert!(r.map(|r| r.len()) == Some(0x1000));
    });

    test_case!(test_page_span_within_one_page, {
        let span = page_span(Paddr::new(0x1003), 10);
        kassert!(span.is_some());
        if let Some((span, offset)) = span {
            kassert!(span.start() == Paddr::new(0x1000));
            kassert!(span.len() == PAGE_SIZE);
            kassert!(offset == 3);
        }
    });

    test_case!(test_page_span_straddles_boundary, {
        let span = page_span(Paddr::new(0x0ffc), 16);
        kassert!(span.is_some());
        if let Some((span, offset)) = span {
            kassert!(span.start() == Paddr::new(0));
            kassert!(span.len() == 2 * PAGE_SIZE);
            kassert!(offset == 0xffc);
        }
    });

    test_case!(test_page_span_aligned_exact, {
        let span = page_span(Vaddr::new(0x4000), 2 * PAGE_SIZE);
        let expected = Some((Vaddr::new(0x4000), 2 * PAGE_SIZE, 0));
        kassert!(span.map(|(s, o)| (s.start(), s.len(), o)) == expected);
    });

    test_case!(test_page_span_overflow, {
        kassert!(page_span(Paddr::new(usize::MAX - 0x10), 0x100).is_none());
        kassert!(page_span(Paddr::new(0x1000), usize::MAX).is_none());
    });

    test_case!(test_align_ops, {
        let va = Vaddr::new(0x1234);
        kassert!(va.align_down_to_page() == Vaddr::new(0x1000));
        kassert!(va.align_up_to_page() == Some(Vaddr::new(0x2000)));
        kassert!(Vaddr::new(usize::MAX).align_up_to_page().is_none());
        kassert!(va.page_offset() == 0x234);
        kassert!(!va.is_page_aligned());
        kassert!((va + 0x10).offset_from(va) == 0x10);
    });
}
