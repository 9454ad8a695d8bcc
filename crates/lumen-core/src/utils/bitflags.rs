// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small macro for declaring bit-flag sets.
//!
//! Used for event categories and for the persisted rendering-API mask.

/// Declares a `Copy` newtype over an integer with named flag constants, set
/// operations, and a `Debug` implementation that lists the set flags by name.
#[macro_export]
#[doc(hidden)]
macro_rules! lumen_bitflags {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident: $ty:ty {
            $(
                $(#[$flag_attr:meta])*
                const $flag_name:ident = $flag_value:expr;
            )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name {
            bits: $ty,
        }

        impl $name {
            /// The set with no flags.
            pub const EMPTY: Self = Self { bits: 0 };

            $(
                $(#[$flag_attr])*
                pub const $flag_name: Self = Self { bits: $flag_value };
            )*

            /// Builds a set from raw bits, keeping unknown bits as-is.
            pub const fn from_bits_retain(bits: $ty) -> Self {
                Self { bits }
            }

            /// Returns the raw bits.
            pub const fn bits(&self) -> $ty {
                self.bits
            }

            /// Returns `true` when no bit is set.
            pub const fn is_empty(&self) -> bool {
                self.bits == 0
            }

            /// Returns `true` if every flag of `other` is set in `self`.
            pub const fn contains(&self, other: Self) -> bool {
                (self.bits & other.bits) == other.bits
            }

            /// Returns `true` if `self` and `other` share at least one flag.
            pub const fn intersects(&self, other: Self) -> bool {
                (self.bits & other.bits) != 0
            }

            /// Sets the flags of `other`.
            pub fn insert(&mut self, other: Self) {
                self.bits |= other.bits;
            }

            /// Clears the flags of `other`.
            pub fn remove(&mut self, other: Self) {
                self.bits &= !other.bits;
            }
        }

        impl core::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, other: Self) -> Self {
                Self { bits: self.bits | other.bits }
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, other: Self) -> Self {
                Self { bits: self.bits & other.bits }
            }
        }

        impl core::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, other: Self) {
                self.bits |= other.bits;
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut remaining = self.bits;
                let mut first = true;
                write!(f, "{}(", stringify!($name))?;
                $(
                    if $flag_value != 0 && (remaining & $flag_value) == $flag_value {
                        if !first {
                            write!(f, " | ")?;
                        }
                        write!(f, "{}", stringify!($flag_name))?;
                        remaining &= !$flag_value;
                        first = false;
                    }
                )*
                if remaining != 0 {
                    if !first {
                        write!(f, " | ")?;
                    }
                    write!(f, "{:#x}", remaining)?;
                    first = false;
                }
                if first {
                    write!(f, "EMPTY")?;
                }
                write!(f, ")")
            }
        }
    };
}

#[cfg(test)]
mod tests {
    lumen_bitflags! {
        /// Flags used only by these tests.
        pub struct Access: u16 {
            const READ = 1 << 0;
            const WRITE = 1 << 1;
            const EXEC = 1 << 2;
        }
    }

    #[test]
    fn union_and_contains() {
        let rw = Access::READ | Access::WRITE;
        assert!(rw.contains(Access::READ));
        assert!(rw.contains(Access::READ | Access::WRITE));
        assert!(!rw.contains(Access::EXEC));
        assert!(rw.intersects(Access::WRITE | Access::EXEC));
        assert!(!rw.intersects(Access::EXEC));
    }

    #[test]
    fn insert_and_remove() {
        let mut flags = Access::EMPTY;
        assert!(flags.is_empty());
        flags.insert(Access::EXEC);
        flags |= Access::READ;
        assert_eq!(flags.bits(), 0b101);
        flags.remove(Access::EXEC);
        assert_eq!(flags, Access::READ);
    }

    #[test]
    fn debug_lists_known_and_unknown_bits() {
        assert_eq!(format!("{:?}", Access::EMPTY), "Access(EMPTY)");
        assert_eq!(
            format!("{:?}", Access::READ | Access::EXEC),
            "Access(READ | EXEC)"
        );
        assert_eq!(
            format!("{:?}", Access::from_bits_retain(0b1_0001)),
            "Access(READ | 0x10)"
        );
    }
}
