use super::address::{Address, AddressRange, Paddr, Vaddr};
use super::operations::UsizeConvert;
use crate::config::PAGE_SIZE;

/// Trait shared by physical and virtual page numbers
pub trait PageNum: UsizeConvert + Copy + Clone + PartialEq + PartialOrd + Eq + Ord {
    /// Address type this page number indexes
    type TAddress: Address;

    /// Advances to the next page
    fn step(&mut self) {
        self.step_by(1);
    }

    /// Advances by `offset` pages
    fn step_by(&mut self, offset: usize) {
        *self = Self::from_usize(self.as_usize() + offset);
    }

    /// Page containing `addr`
    fn from_addr_floor(addr: Self::TAddress) -> Self {
        Self::from_usize(addr.as_usize() / PAGE_SIZE)
    }

    /// First page starting at or after `addr`
    fn from_addr_ceil(addr: Self::TAddress) -> Self {
        Self::from_usize(addr.as_usize().div_ceil(PAGE_SIZE))
    }

    /// Address of the first byte of the page
    fn start_addr(self) -> Self::TAddress {
        Self::TAddress::from_usize(self.as_usize() * PAGE_SIZE)
    }
}

/// Implements `PageNum` for a `usize` newtype over the given address type
#[macro_export]
macro_rules! impl_page_num {
    ($type:ty, $addr_type:ty) => {
        impl $crate::mm::address::UsizeConvert for $type {
            fn as_usize(&self) -> usize {
                self.0
            }

            fn from_usize(value: usize) -> Self {
                Self(value)
            }
        }

        impl $crate::mm::address::PageNum for $type {
            type TAddress = $addr_type;
        }
    };
}

/// Physical page number
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Ppn(pub usize);
impl_page_num!(Ppn, Paddr);

/// Virtual page number
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Vpn(pub usize);
impl_page_num!(Vpn, Vaddr);

/// Half-open range of page numbers, iterable in ascending order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageNumRange<T: PageNum> {
    start: T,
    end: T,
}

/// Range of physical pages
pub type PpnRange = PageNumRange<Ppn>;
/// Range of virtual pages
pub type VpnRange = PageNumRange<Vpn>;

impl<T: PageNum> PageNumRange<T> {
    /// `[start, end)`; `start` must not exceed `end`
    pub fn new(start: T, end: T) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// `len` pages starting at `start`
    pub fn from_start_len(start: T, len: usize) -> Self {
        Self::new(start, T::from_usize(start.as_usize() + len))
    }

    /// Smallest page range covering every byte of `range`
    pub fn covering(range: &AddressRange<T::TAddress>) -> Self {
        Self::new(
            T::from_addr_floor(range.start()),
            T::from_addr_ceil(range.end()),
        )
    }

    /// Inclusive start
    pub fn start(&self) -> T {
        self.start
    }

    /// Exclusive end
    pub fn end(&self) -> T {
        self.end
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.end.as_usize() - self.start.as_usize()
    }

    /// Whether the range holds nothing
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl<T: PageNum> Iterator for PageNumRange<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start < self.end {
            let current = self.start;
            self.start.step();
            Some(current)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T: PageNum> ExactSizeIterator for PageNumRange<T> {}
