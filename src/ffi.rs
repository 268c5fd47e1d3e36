//! The C ABI that instrumented code links against.
//!
//! Every function here is a checked operation from [crate::narrow] or [crate::shift] with the
//!  fatal policy applied: it returns the checked value, or it does not return at all.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_int, c_long, c_longlong, c_schar, c_short, c_uchar, c_uint, c_ulong, c_ulonglong, c_ushort, CStr};
use crate::narrow;
use crate::report::{self, OrFatal};
use crate::shift;
use crate::target::EntryPoint;

macro_rules! export_narrowing {
    ($($signed_sym:ident, $unsigned_sym:ident => $signed_fn:ident, $unsigned_fn:ident: $c_ty:ty;)*) => {
        $(
            #[no_mangle]
            pub extern "C" fn $signed_sym(x: c_longlong) -> $c_ty {
                narrow::$signed_fn(x).or_fatal()
            }

            #[no_mangle]
            pub extern "C" fn $unsigned_sym(x: c_ulonglong) -> $c_ty {
                narrow::$unsigned_fn(x).or_fatal()
            }
        )*
    }
}

export_narrowing! {
    __INTCHECK_INT_S,     __INTCHECK_INT_U     => int_s,     int_u:     c_int;
    __INTCHECK_UINT_S,    __INTCHECK_UINT_U    => uint_s,    uint_u:    c_uint;
    __INTCHECK_SHORT_S,   __INTCHECK_SHORT_U   => short_s,   short_u:   c_short;
    __INTCHECK_USHORT_S,  __INTCHECK_USHORT_U  => ushort_s,  ushort_u:  c_ushort;
    __INTCHECK_CHAR_S,    __INTCHECK_CHAR_U    => char_s,    char_u:    c_schar;
    __INTCHECK_UCHAR_S,   __INTCHECK_UCHAR_U   => uchar_s,   uchar_u:   c_uchar;
    __INTCHECK_LINT_S,    __INTCHECK_LINT_U    => lint_s,    lint_u:    c_long;
    __INTCHECK_ULINT_S,   __INTCHECK_ULINT_U   => ulint_s,   ulint_u:   c_ulong;
    __INTCHECK_LLINT_S,   __INTCHECK_LLINT_U   => llint_s,   llint_u:   c_longlong;
    __INTCHECK_ULLINT_S,  __INTCHECK_ULLINT_U  => ullint_s,  ullint_u:  c_ulonglong;
    __INTCHECK_INDEX_S,   __INTCHECK_INDEX_U   => index_s,   index_u:   usize;
    __INTCHECK_PTRDIFF_S, __INTCHECK_PTRDIFF_U => ptrdiff_s, ptrdiff_u: isize;
    __INTCHECK_INT8_S,    __INTCHECK_INT8_U    => int8_s,    int8_u:    i8;
    __INTCHECK_UINT8_S,   __INTCHECK_UINT8_U   => uint8_s,   uint8_u:   u8;
    __INTCHECK_INT16_S,   __INTCHECK_INT16_U   => int16_s,   int16_u:   i16;
    __INTCHECK_UINT16_S,  __INTCHECK_UINT16_U  => uint16_s,  uint16_u:  u16;
    __INTCHECK_INT32_S,   __INTCHECK_INT32_U   => int32_s,   int32_u:   i32;
    __INTCHECK_UINT32_S,  __INTCHECK_UINT32_U  => uint32_s,  uint32_u:  u32;
}

#[no_mangle]
pub extern "C" fn __INTCHECK_GETBITLENGTH(x: c_ulonglong) -> usize {
    shift::bit_length(x) as usize
}

#[no_mangle]
pub extern "C" fn __INTLEFTSHIFT(op1: c_ulonglong, op2: c_ulonglong) -> c_ulonglong {
    shift::checked_shl(op1, op2).or_fatal()
}

#[no_mangle]
pub extern "C" fn __INTRIGHTSHIFT(op1: c_ulonglong, op2: c_ulonglong) -> c_ulonglong {
    shift::checked_shr(op1, op2)
}

/// Writes `errmsg` to stderr and terminates the process.
///
/// # Safety
///
/// `errmsg` must be null or point to a NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn __INTCHECK_ERROR(errmsg: *const c_char) -> ! {
    if errmsg.is_null() {
        report::fatal_message("Error!(Failed in: unknown)\n");
    }

    let msg = CStr::from_ptr(errmsg).to_string_lossy();
    report::fatal_message(&msg)
}

/// The declarations of all exported functions, in the form the rewriter prepends to instrumented
///  sources. `include/intcheck.h` contains the same declarations.
pub fn c_declarations() -> String {
    let mut result = String::new();
    result.push_str("#include <stddef.h>\n");
    result.push_str("#include <stdint.h>\n");
    result.push_str("extern void __INTCHECK_ERROR(const char *);\n");

    for entry_point in EntryPoint::all() {
        result.push_str(&entry_point.c_declaration());
        result.push('\n');
    }

    result.push_str("extern size_t __INTCHECK_GETBITLENGTH(long long unsigned int x);\n");
    result.push_str("extern long long unsigned int __INTLEFTSHIFT(long long unsigned int op1, long long unsigned int op2);\n");
    result.push_str("extern long long unsigned int __INTRIGHTSHIFT(long long unsigned int op1, long long unsigned int op2);\n");
    result
}
