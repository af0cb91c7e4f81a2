//! Opaque code references and their typed views.
//!
//! A [`RawFunction`] is what a capability slot stores: the address of some
//! code owned elsewhere, with no signature attached. Provider and consumer
//! agree on the signature out of band; the consumer recovers it through the
//! `unsafe` [`RawFunction::get`], which hands back a [`Function`] that can
//! be called directly.

use std::ffi::c_void;
use std::fmt;
use std::ops::Deref;
use std::ptr::NonNull;

/// Non-null, non-owning pointer to executable code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawFunction(NonNull<c_void>);

// A code address is never written through, so sharing it is harmless.
unsafe impl Send for RawFunction {}
unsafe impl Sync for RawFunction {}

impl RawFunction {
    pub fn from_fn<F: FnPtr>(f: F) -> Self {
        f.into_raw()
    }

    /// Wrap an address obtained elsewhere, e.g. from a symbol lookup.
    /// Returns `None` for null.
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// Reinterpret the address as a function pointer of type `F`.
    ///
    /// # Safety
    /// The address must point to a function whose signature and calling
    /// convention are exactly `F`, and that code must outlive every use of
    /// the returned pointer.
    pub unsafe fn cast<F: FnPtr>(self) -> F {
        F::from_raw(self)
    }

    /// Typed view of the function.
    ///
    /// # Safety
    /// Same contract as [`RawFunction::cast`].
    pub unsafe fn get<F: FnPtr>(self) -> Function<F> {
        Function {
            raw: self,
            f: self.cast(),
        }
    }
}

impl fmt::Debug for RawFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawFunction({:p})", self.0)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Function pointer types a [`RawFunction`] can be built from and cast to.
///
/// Implemented for `fn`, `unsafe fn`, `extern "C" fn` and
/// `unsafe extern "C" fn` pointers taking up to six arguments.
pub trait FnPtr: Copy + sealed::Sealed {
    fn into_raw(self) -> RawFunction;

    /// # Safety
    /// See [`RawFunction::cast`].
    unsafe fn from_raw(raw: RawFunction) -> Self;
}

macro_rules! impl_fn_ptr {
    (@one $ty:ty; $($arg:ident),*) => {
        impl<R, $($arg),*> sealed::Sealed for $ty {}

        impl<R, $($arg),*> FnPtr for $ty {
            fn into_raw(self) -> RawFunction {
                // Function pointers are never null.
                RawFunction(unsafe { NonNull::new_unchecked(self as *const () as *mut c_void) })
            }

            unsafe fn from_raw(raw: RawFunction) -> Self {
                std::mem::transmute_copy::<*mut c_void, Self>(&raw.as_ptr())
            }
        }
    };
    ($($arg:ident),*) => {
        impl_fn_ptr!(@one fn($($arg),*) -> R; $($arg),*);
        impl_fn_ptr!(@one unsafe fn($($arg),*) -> R; $($arg),*);
        impl_fn_ptr!(@one extern "C" fn($($arg),*) -> R; $($arg),*);
        impl_fn_ptr!(@one unsafe extern "C" fn($($arg),*) -> R; $($arg),*);
    };
}

impl_fn_ptr!();
impl_fn_ptr!(A);
impl_fn_ptr!(A, B);
impl_fn_ptr!(A, B, C);
impl_fn_ptr!(A, B, C, D);
impl_fn_ptr!(A, B, C, D, E);
impl_fn_ptr!(A, B, C, D, E, F);

/// Typed function recovered from a [`RawFunction`]. Derefs to `F`, so it
/// can be called like the function itself.
#[derive(Clone, Copy)]
pub struct Function<F> {
    raw: RawFunction,
    f: F,
}

impl<F: FnPtr> Function<F> {
    pub fn new(f: F) -> Self {
        Self {
            raw: f.into_raw(),
            f,
        }
    }

    pub fn raw(&self) -> RawFunction {
        self.raw
    }

    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F> Deref for Function<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.f
    }
}

impl<F> fmt::Debug for Function<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Function").field(&self.raw).finish()
    }
}
