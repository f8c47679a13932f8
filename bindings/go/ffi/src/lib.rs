//! C-FFI layer for canonref — used by Go (cgo) and other FFI consumers.
//!
//! ZERO logic here. All calls delegate to `canonref-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `canonref_free_string()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use canonref_core::{Style, Table};

/// Result from a canonref FFI call.
/// If `error` is null, the call succeeded and `result` contains the output.
/// If `error` is non-null, the call failed and `error` contains the error message.
/// The caller MUST free both `result` and `error` with `canonref_free_string()`.
#[repr(C)]
pub struct CanonrefResult {
    pub result: *mut c_char,
    pub error: *mut c_char,
}

impl CanonrefResult {
    fn ok(value: String) -> Self {
        let c = CString::new(value).unwrap_or_default();
        CanonrefResult {
            result: c.into_raw(),
            error: std::ptr::null_mut(),
        }
    }

    fn err(msg: String) -> Self {
        let c = CString::new(msg).unwrap_or_default();
        CanonrefResult {
            result: std::ptr::null_mut(),
            error: c.into_raw(),
        }
    }
}

impl From<canonref_core::Error> for CanonrefResult {
    fn from(e: canonref_core::Error) -> Self {
        CanonrefResult::err(format!("[{}] {}", e.kind(), e))
    }
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Run `f` against the bundled table when `books_json` is null,
/// otherwise against a table decoded from it.
unsafe fn with_table(
    books_json: *const c_char,
    f: impl FnOnce(&Table) -> CanonrefResult,
) -> CanonrefResult {
    if books_json.is_null() {
        return match canonref_core::bundled::table() {
            Ok(table) => f(table),
            Err(e) => e.into(),
        };
    }
    let Some(json) = cstr_to_str(books_json) else {
        return CanonrefResult::err("invalid UTF-8 book table".into());
    };
    match Table::from_json(json) {
        Ok(table) => f(&table),
        Err(e) => e.into(),
    }
}

/// Parse a reference and return JSON: `{"reference": {...}, "formatted": "..."}`.
///
/// `books_json` may be null to use the bundled book table.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string; `books_json`
/// must be null or one.
/// The caller must free the returned strings with `canonref_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn canonref_parse(
    text: *const c_char,
    books_json: *const c_char,
) -> CanonrefResult {
    let Some(text) = cstr_to_str(text) else {
        return CanonrefResult::err("null or invalid UTF-8 input".into());
    };

    with_table(books_json, |table| match canonref_core::parse(text, table) {
        Ok(reference) => {
            let output = serde_json::json!({
                "reference": reference,
                "formatted": reference.to_string(),
            });
            match serde_json::to_string_pretty(&output) {
                Ok(json) => CanonrefResult::ok(json),
                Err(e) => CanonrefResult::err(format!("Serialization error: {}", e)),
            }
        }
        Err(e) => e.into(),
    })
}

/// Parse a reference and render it. `style` is one of
/// `"canonical"`, `"dotted"`, `"human"`.
///
/// # Safety
/// `text` and `style` must be valid null-terminated UTF-8 C strings;
/// `books_json` must be null or one.
/// The caller must free the returned strings with `canonref_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn canonref_format(
    text: *const c_char,
    style: *const c_char,
    books_json: *const c_char,
) -> CanonrefResult {
    let (Some(text), Some(style)) = (cstr_to_str(text), cstr_to_str(style)) else {
        return CanonrefResult::err("null or invalid UTF-8 input".into());
    };

    with_table(books_json, |table| {
        let style = match style {
            "canonical" => Style::Canonical,
            "dotted" => Style::Dotted,
            "human" => Style::Human(table),
            other => return CanonrefResult::err(format!("unknown style {:?}", other)),
        };
        match canonref_core::parse(text, table) {
            Ok(reference) => CanonrefResult::ok(reference.format(style)),
            Err(e) => e.into(),
        }
    })
}

/// Parse a Rule of Benedict reference and return its canonical form.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `canonref_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn canonref_parse_section(text: *const c_char) -> CanonrefResult {
    let Some(text) = cstr_to_str(text) else {
        return CanonrefResult::err("null or invalid UTF-8 input".into());
    };

    match canonref_core::parse_section(text) {
        Ok(section_ref) => CanonrefResult::ok(section_ref.format(Style::Canonical)),
        Err(e) => e.into(),
    }
}

/// Normalize a book name to its alias lookup key.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `canonref_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn canonref_normalize_alias(text: *const c_char) -> CanonrefResult {
    match cstr_to_str(text) {
        Some(s) => CanonrefResult::ok(canonref_core::normalizer::normalize_alias(s)),
        None => CanonrefResult::err("null or invalid UTF-8 input".into()),
    }
}

/// Free a string previously returned by a canonref FFI function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by a canonref FFI function,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn canonref_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
