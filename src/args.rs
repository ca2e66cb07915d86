//! Argument Cursor: sequential reads plus a replay cache for `%N$`.
//!
//! C printf walks a `va_list` that can only move forward. Here the call
//! site boxes its arguments into a slice of [`Arg`] and the cursor walks
//! that slice the same way: one native read per argument, never rewound.
//! Positional references materialize an argument into a caller-provided
//! [`ArgSlot`] cache the first time they see it and replay it afterwards.

use core::ffi::CStr;

use crate::options::FormatOptions;

/// One argument as captured at the call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    /// A bare address, printed by `%p`.
    Ptr(usize),
    /// NUL-terminated byte string; `None` is the null pointer.
    Str(Option<&'a [u8]>),
    /// NUL-terminated wide string for `%ls`; `None` is the null pointer.
    WideStr(Option<&'a [u32]>),
}

macro_rules! arg_from {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {$(
        impl From<$ty> for Arg<'_> {
            fn from(value: $ty) -> Self {
                Self::$variant(value as $wide)
            }
        }
    )+};
}

arg_from!(Int as i64: i8, i16, i32, i64, isize);
arg_from!(Uint as u64: u8, u16, u32, u64, usize);
arg_from!(Float as f64: f32, f64);

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Uint(u64::from(u32::from(value)))
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Some(value.as_bytes()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Self::Str(value.map(str::as_bytes))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Str(Some(value))
    }
}

impl<'a> From<&'a CStr> for Arg<'a> {
    fn from(value: &'a CStr) -> Self {
        Self::Str(Some(value.to_bytes()))
    }
}

impl<'a> From<&'a [u32]> for Arg<'a> {
    fn from(value: &'a [u32]) -> Self {
        Self::WideStr(Some(value))
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self {
        Self::Ptr(value as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(value: *mut T) -> Self {
        Self::Ptr(value as usize)
    }
}

/// An address popped for `%p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(pub usize);

/// One materialized positional argument.
///
/// The tag records the kind requested when the slot was filled. Integer
/// slots keep the sign-extended bit pattern so a replay may ask for a
/// different integer width, as the C union allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ArgSlot<'a> {
    #[default]
    Vacant,
    Integer(u64),
    Float(f64),
    Pointer(usize),
    Str(Option<&'a [u8]>),
    WideStr(Option<&'a [u32]>),
}

/// A value type a conversion can request from the cursor.
pub trait PopArg<'a>: Sized + Copy {
    /// Reads the value out of a freshly consumed argument.
    fn from_arg(arg: Arg<'a>) -> Self;

    fn into_slot(self) -> ArgSlot<'a>;

    /// Replays a cached slot as this type.
    fn from_slot(slot: ArgSlot<'a>) -> Self;
}

#[cold]
#[track_caller]
fn kind_mismatch(wanted: &str, found: &dyn core::fmt::Debug) -> ! {
    panic!("printf argument kind mismatch: conversion wants {wanted}, argument is {found:?}")
}

macro_rules! pop_int {
    ($($ty:ty),+) => {$(
        impl<'a> PopArg<'a> for $ty {
            fn from_arg(arg: Arg<'a>) -> Self {
                match arg {
                    Arg::Int(v) => v as $ty,
                    Arg::Uint(v) => v as $ty,
                    Arg::Ptr(v) => v as $ty,
                    other => kind_mismatch(stringify!($ty), &other),
                }
            }

            fn into_slot(self) -> ArgSlot<'a> {
                ArgSlot::Integer(self as i64 as u64)
            }

            fn from_slot(slot: ArgSlot<'a>) -> Self {
                match slot {
                    ArgSlot::Integer(bits) => bits as $ty,
                    ArgSlot::Pointer(v) => v as $ty,
                    other => kind_mismatch(stringify!($ty), &other),
                }
            }
        }
    )+};
}

pop_int!(i32, i64, isize, u32, u64, usize);

// char and short travel through varargs as int.
macro_rules! pop_promoted {
    ($($ty:ty),+) => {$(
        impl<'a> PopArg<'a> for $ty {
            fn from_arg(arg: Arg<'a>) -> Self {
                i32::from_arg(arg) as $ty
            }

            fn into_slot(self) -> ArgSlot<'a> {
                ArgSlot::Integer(self as i64 as u64)
            }

            fn from_slot(slot: ArgSlot<'a>) -> Self {
                i32::from_slot(slot) as $ty
            }
        }
    )+};
}

pop_promoted!(i8, u8, i16, u16);

impl<'a> PopArg<'a> for f64 {
    fn from_arg(arg: Arg<'a>) -> Self {
        match arg {
            Arg::Float(v) => v,
            other => kind_mismatch("a floating-point value", &other),
        }
    }

    fn into_slot(self) -> ArgSlot<'a> {
        ArgSlot::Float(self)
    }

    fn from_slot(slot: ArgSlot<'a>) -> Self {
        match slot {
            ArgSlot::Float(v) => v,
            other => kind_mismatch("a floating-point value", &other),
        }
    }
}

impl<'a> PopArg<'a> for Address {
    fn from_arg(arg: Arg<'a>) -> Self {
        match arg {
            Arg::Ptr(v) => Address(v),
            Arg::Int(v) => Address(v as usize),
            Arg::Uint(v) => Address(v as usize),
            Arg::Str(s) => Address(s.map_or(0, |s| s.as_ptr() as usize)),
            Arg::WideStr(s) => Address(s.map_or(0, |s| s.as_ptr() as usize)),
            other => kind_mismatch("a pointer", &other),
        }
    }

    fn into_slot(self) -> ArgSlot<'a> {
        ArgSlot::Pointer(self.0)
    }

    fn from_slot(slot: ArgSlot<'a>) -> Self {
        match slot {
            ArgSlot::Pointer(v) => Address(v),
            ArgSlot::Integer(bits) => Address(bits as usize),
            ArgSlot::Str(s) => Address(s.map_or(0, |s| s.as_ptr() as usize)),
            ArgSlot::WideStr(s) => Address(s.map_or(0, |s| s.as_ptr() as usize)),
            other => kind_mismatch("a pointer", &other),
        }
    }
}

impl<'a> PopArg<'a> for Option<&'a [u8]> {
    fn from_arg(arg: Arg<'a>) -> Self {
        match arg {
            Arg::Str(s) => s,
            Arg::Ptr(0) => None,
            other => kind_mismatch("a byte string", &other),
        }
    }

    fn into_slot(self) -> ArgSlot<'a> {
        ArgSlot::Str(self)
    }

    fn from_slot(slot: ArgSlot<'a>) -> Self {
        match slot {
            ArgSlot::Str(s) => s,
            ArgSlot::Pointer(0) => None,
            other => kind_mismatch("a byte string", &other),
        }
    }
}

impl<'a> PopArg<'a> for Option<&'a [u32]> {
    fn from_arg(arg: Arg<'a>) -> Self {
        match arg {
            Arg::WideStr(s) => s,
            Arg::Ptr(0) => None,
            other => kind_mismatch("a wide string", &other),
        }
    }

    fn into_slot(self) -> ArgSlot<'a> {
        ArgSlot::WideStr(self)
    }

    fn from_slot(slot: ArgSlot<'a>) -> Self {
        match slot {
            ArgSlot::WideStr(s) => s,
            ArgSlot::Pointer(0) => None,
            other => kind_mismatch("a wide string", &other),
        }
    }
}

/// Forward-only reader over the call-site arguments.
///
/// Invariant: a positional index is filled by exactly one native read, the
/// first time it is referenced. Every later reference replays the cache.
#[derive(Debug)]
pub struct ArgCursor<'a, 'c> {
    args: &'a [Arg<'a>],
    next: usize,
    cache: &'c mut [ArgSlot<'a>],
    materialized: usize,
}

impl<'a, 'c> ArgCursor<'a, 'c> {
    pub fn new(args: &'a [Arg<'a>], cache: &'c mut [ArgSlot<'a>]) -> Self {
        Self {
            args,
            next: 0,
            cache,
            materialized: 0,
        }
    }

    /// Arguments consumed from the call site so far.
    pub fn native_reads(&self) -> usize {
        self.next
    }

    /// Positional slots filled so far.
    pub fn materialized(&self) -> usize {
        self.materialized
    }

    /// Returns the argument `opts` refers to, read as `T`.
    ///
    /// # Panics
    ///
    /// On a positional index that skips past the next unfilled slot, that
    /// exceeds the cache, or when the argument list is exhausted.
    #[track_caller]
    pub fn pop<T: PopArg<'a>>(&mut self, opts: &FormatOptions) -> T {
        let Some(position) = opts.arg_position else {
            // Sequential reads are never replayed, so they bypass the cache.
            return self.read_native();
        };
        assert!(position >= 1, "printf positional arguments start at 1");
        let index = position - 1;

        if index < self.materialized {
            return T::from_slot(self.cache[index]);
        }
        assert!(
            index == self.materialized,
            "printf positional argument {position} referenced before argument {}",
            self.materialized + 1
        );
        assert!(
            index < self.cache.len(),
            "printf positional argument {position} exceeds the {}-slot cache",
            self.cache.len()
        );

        let value: T = self.read_native();
        self.cache[index] = value.into_slot();
        self.materialized += 1;
        value
    }

    #[track_caller]
    fn read_native<T: PopArg<'a>>(&mut self) -> T {
        let Some(&arg) = self.args.get(self.next) else {
            panic!(
                "printf argument list exhausted after {} arguments",
                self.args.len()
            );
        };
        self.next += 1;
        T::from_arg(arg)
    }
}
