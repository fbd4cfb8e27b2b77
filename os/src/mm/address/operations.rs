//! Address Operations Module
//!
//! 此模块定义了用于自定义地址类型（如 Paddr 和 Vaddr）的转换、算术和对齐 Trait。
//! 目标是使强类型地址在使用时具备必要的 `usize` 运算能力，同时保持类型安全：
//! 地址只能与字节偏移 (`usize`) 相加减，两个地址之间只能求距离。

use crate::config::PAGE_SIZE;

/// [UsizeConvert] Trait
/// ---------------------
/// 允许类型与 usize 之间互相转换。
/// 任何自定义的地址或页码类型 (例如 Paddr, Vaddr) 必须实现此 Trait，
/// 以便进行底层数值操作。
pub trait UsizeConvert: Copy + Clone + PartialEq + PartialOrd + Eq + Ord {
    /// 将类型转换为 usize。
    fn as_usize(&self) -> usize;
    /// 将 usize 转换为类型。
    fn from_usize(value: usize) -> Self;
}

/// `impl_calc_ops!` 宏
/// ---------------------
/// 为给定类型实现与字节偏移的加减运算。
/// 这些实现通过先转换为 usize 进行计算，然后将结果转回类型来完成。
#[macro_export]
macro_rules! impl_calc_ops {
    ($type:ty) => {
        impl core::ops::Add<usize> for $type {
            type Output = Self;
            fn add(self, rhs: usize) -> Self::Output {
                $crate::mm::address::UsizeConvert::from_usize(
                    $crate::mm::address::UsizeConvert::as_usize(&self) + rhs,
                )
            }
        }
        impl core::ops::AddAssign<usize> for $type {
            fn add_assign(&mut self, rhs: usize) {
                *self = *self + rhs;
            }
        }
        impl core::ops::Sub<usize> for $type {
            type Output = Self;
            fn sub(self, rhs: usize) -> Self::Output {
                $crate::mm::address::UsizeConvert::from_usize(
                    $crate::mm::address::UsizeConvert::as_usize(&self) - rhs,
                )
            }
        }
        impl core::ops::SubAssign<usize> for $type {
            fn sub_assign(&mut self, rhs: usize) {
                *self = *self - rhs;
            }
        }
    };
}

/// [AlignOps] Trait
/// ---------------------
/// 定义了地址对齐操作，例如检查对齐、向上对齐和向下对齐。
///
/// 注意: 所有对齐操作都要求 `alignment` 是 2 的幂。
/// 向上对齐在溢出时返回 `None`，而不是回绕到 0。
pub trait AlignOps: UsizeConvert {
    /// 检查地址是否已对齐到给定的对齐边界。
    fn is_aligned(self, alignment: usize) -> bool {
        debug_assert!(
            alignment.is_power_of_two(),
            "alignment must be a power of two"
        );
        self.as_usize() & (alignment - 1) == 0
    }
    /// 检查地址是否已页对齐（对齐到 `PAGE_SIZE`）。
    fn is_page_aligned(self) -> bool {
        self.is_aligned(PAGE_SIZE)
    }
    /// 将地址向上对齐到给定的对齐边界，溢出时返回 `None`。
    fn align_up(self, alignment: usize) -> Option<Self> {
        debug_assert!(
            alignment.is_power_of_two(),
            "alignment must be a power of two"
        );
        let mask = alignment - 1;
        // 核心逻辑: (addr + mask) & !mask
        self.as_usize()
            .checked_add(mask)
            .map(|v| Self::from_usize(v & !mask))
    }
    /// 将地址向下对齐到给定的对齐边界。
    fn align_down(self, alignment: usize) -> Self {
        debug_assert!(
            alignment.is_power_of_two(),
            "alignment must be a power of two"
        );
        // 核心逻辑: addr & !mask
        Self::from_usize(self.as_usize() & !(alignment - 1))
    }
    /// 将地址向上对齐到页大小（`PAGE_SIZE`）。
    fn align_up_to_page(self) -> Option<Self> {
        self.align_up(PAGE_SIZE)
    }
    /// 将地址向下对齐到页大小（`PAGE_SIZE`）。
    fn align_down_to_page(self) -> Self {
        self.align_down(PAGE_SIZE)
    }
}

impl UsizeConvert for usize {
    fn as_usize(&self) -> usize {
        *self
    }
    fn from_usize(value: usize) -> Self {
        value
    }
}

impl AlignOps for usize {}
