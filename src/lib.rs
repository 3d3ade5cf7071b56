//! chrdlib: chord chart markup parser and page layout library for Chrd.
//!
//! A chart is plain text: `#name value` directive lines, comment lines and
//! lines of bars such as `| C Am | F G :|`. Rendering produces an ordered
//! list of drawing commands in PDF coordinates, which any page sink can
//! paint. An SVG sink is bundled for previews.
//!
//! # Example
//! ```
//! use chrdlib::{render_chart, FixedAdvanceFonts, RenderOptions};
//!
//! let chart = "#title Autumn Leaves\n#start\n| Am7 | D7 | G^ | C^";
//! let rendered = render_chart(chart, &RenderOptions::default(), &FixedAdvanceFonts::default())
//!     .unwrap();
//! assert_eq!(rendered.file_name, "autumn_leaves.pdf");
//! assert!(rendered.diagnostics.is_empty());
//! ```

pub mod chord;
pub mod error;
pub mod fonts;
pub mod glyphs;
pub mod model;
pub mod renderer;
pub mod svg;

#[cfg(target_os = "android")]
pub mod android;

pub use chord::ChordToken;
pub use error::{ChartError, Result};
pub use fonts::{FixedAdvanceFonts, FontProvider};
pub use model::*;
pub use renderer::{
    file_name_for_title, render_chart, segment_line, Cursor, PageSize, Param, RenderOptions,
};
pub use svg::chart_to_svg;

/// Render a chart with the bundled metrics and return it as pretty JSON.
/// Useful for passing data across FFI boundaries.
pub fn render_chart_to_json(text: &str, options: &RenderOptions) -> Result<String> {
    let chart = render_chart(text, options, &FixedAdvanceFonts::default())?;
    Ok(serde_json::to_string_pretty(&chart)?)
}

/// Render a chart with the bundled metrics and paint it as SVG.
pub fn render_chart_to_svg(text: &str, options: &RenderOptions) -> Result<String> {
    let chart = render_chart(text, options, &FixedAdvanceFonts::default())?;
    Ok(chart_to_svg(&chart))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Read a C string argument, or `None` for null or invalid UTF-8.
unsafe fn c_str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn ffi_options(scale: f64) -> RenderOptions {
    if scale > 0.0 {
        RenderOptions::with_scale(scale)
    } else {
        RenderOptions::default()
    }
}

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(s) => CString::new(s).unwrap_or_default().into_raw(),
        Err(e) => {
            log::error!("chart render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render chart text and return the drawing commands as a JSON C string.
/// The caller must free the returned string with `chrdlib_free_string`.
///
/// `scale` multiplies every layout parameter. Pass 0.0 for the default.
/// Returns null when the chart cannot be rendered.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chrdlib_render_json(text: *const c_char, scale: f64) -> *mut c_char {
    let Some(text) = (unsafe { c_str_arg(text) }) else {
        return std::ptr::null_mut();
    };
    into_c_string(render_chart_to_json(text, &ffi_options(scale)))
}

/// Render chart text and return an SVG preview as a C string.
/// The caller must free the returned string with `chrdlib_free_string`.
///
/// `scale` multiplies every layout parameter. Pass 0.0 for the default.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chrdlib_render_svg(text: *const c_char, scale: f64) -> *mut c_char {
    let Some(text) = (unsafe { c_str_arg(text) }) else {
        return std::ptr::null_mut();
    };
    into_c_string(render_chart_to_svg(text, &ffi_options(scale)))
}

/// Free a string previously returned by chrdlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a chrdlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn chrdlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
