//! Byte and bit access for keys.
//!
//! A key is never stored by a tree. It is only read, one byte at a time, while a tree computes
//! the path to the node addressed by the key. Fixed-width keys expose every byte of their native
//! representation. String-like keys stop at their first zero unit, so the terminator itself is
//! never part of the path.

use std::cmp::Ordering;
use std::ffi::{CStr, CString};
use std::mem;

/// Number of bits consumed from each key byte.
pub const BITS_PER_BYTE: usize = 8;

/// A type whose raw bytes can be used to address a node in a tree.
///
/// # Examples
///
/// ```
/// use bit_tries::key::Key;
///
/// assert_eq!("ab".byte_at(0), Some(b'a'));
/// assert_eq!("ab".byte_at(2), None);
/// assert_eq!(0x0102u16.to_ne_bytes()[1], 0x0102u16.byte_at(1).unwrap());
/// assert_eq!(7u8.byte_at(1), None);
/// ```
pub trait Key {
    /// Returns the byte at `index`, or `None` once the key has ended.
    fn byte_at(&self, index: usize) -> Option<u8>;
}

/// Returns bit `index` of `byte`, where index 0 is the most significant bit.
///
/// # Examples
///
/// ```
/// use bit_tries::key::bit;
///
/// assert_eq!(bit(0b1000_0000, 0), 1);
/// assert_eq!(bit(0b1000_0000, 7), 0);
/// assert_eq!(bit(0b0000_0001, 7), 1);
/// ```
#[inline]
pub fn bit(byte: u8, index: usize) -> u8 {
    debug_assert!(index < BITS_PER_BYTE, "bit index {} out of range", index);
    (byte >> (BITS_PER_BYTE - 1 - (index & (BITS_PER_BYTE - 1)))) & 1
}

/// Compares `byte` against `pattern` one bit at a time, most significant bit first, and stops at
/// the first bit where they differ.
///
/// # Examples
///
/// ```
/// use bit_tries::key::compare_bits;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_bits(b'a', b'b'), Ordering::Less);
/// assert_eq!(compare_bits(0x80, 0x7f), Ordering::Greater);
/// assert_eq!(compare_bits(b'z', b'z'), Ordering::Equal);
/// ```
pub fn compare_bits(byte: u8, pattern: u8) -> Ordering {
    for index in 0..BITS_PER_BYTE {
        match bit(byte, index).cmp(&bit(pattern, index)) {
            Ordering::Equal => continue,
            ordering => return ordering,
        }
    }
    Ordering::Equal
}

macro_rules! fixed_width_key {
    ($($key_type:ty),*) => {
        $(
            impl Key for $key_type {
                #[inline]
                fn byte_at(&self, index: usize) -> Option<u8> {
                    if index < mem::size_of::<$key_type>() {
                        Some(self.to_ne_bytes()[index])
                    } else {
                        None
                    }
                }
            }
        )*
    }
}

fixed_width_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Key for char {
    fn byte_at(&self, index: usize) -> Option<u8> {
        u32::from(*self).byte_at(index)
    }
}

impl Key for bool {
    fn byte_at(&self, index: usize) -> Option<u8> {
        u8::from(*self).byte_at(index)
    }
}

impl<const N: usize> Key for [u8; N] {
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.get(index).copied()
    }
}

impl Key for [u8] {
    fn byte_at(&self, index: usize) -> Option<u8> {
        match self.get(index) {
            Some(0) | None => None,
            Some(byte) => Some(*byte),
        }
    }
}

impl Key for Vec<u8> {
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.as_slice().byte_at(index)
    }
}

impl Key for str {
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.as_bytes().byte_at(index)
    }
}

impl Key for String {
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.as_bytes().byte_at(index)
    }
}

impl Key for CStr {
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.to_bytes().byte_at(index)
    }
}

impl Key for CString {
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.as_bytes().byte_at(index)
    }
}

macro_rules! wide_string_key {
    ($($unit_type:ty),*) => {
        $(
            impl Key for [$unit_type] {
                fn byte_at(&self, index: usize) -> Option<u8> {
                    let width = mem::size_of::<$unit_type>();
                    match self.get(index / width) {
                        Some(0) | None => None,
                        Some(unit) => Some(unit.to_ne_bytes()[index % width]),
                    }
                }
            }

            impl Key for Vec<$unit_type> {
                fn byte_at(&self, index: usize) -> Option<u8> {
                    self.as_slice().byte_at(index)
                }
            }
        )*
    }
}

wide_string_key!(u16, u32);

impl<'a, T> Key for &'a T
where
    T: Key + ?Sized,
{
    fn byte_at(&self, index: usize) -> Option<u8> {
        (**self).byte_at(index)
    }
}
