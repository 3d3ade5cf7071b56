//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jstring};
use jni::JNIEnv;

use crate::{render_chart_to_json, render_chart_to_svg, RenderOptions, Result};

fn options(scale: jfloat) -> RenderOptions {
    if scale > 0.0 {
        RenderOptions::with_scale(scale as f64)
    } else {
        RenderOptions::default()
    }
}

fn render_with(
    env: &mut JNIEnv,
    text: &JString,
    scale: jfloat,
    render: fn(&str, &RenderOptions) -> Result<String>,
) -> jstring {
    let chart: String = match env.get_string(text) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    match render(&chart, &options(scale)) {
        Ok(out) => match env.new_string(&out) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::error!("chart render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render chart text to an SVG preview.
///
/// Called from Kotlin as:
///   external fun renderSvg(text: String, scale: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_chrd_app_ChrdLib_renderSvg(
    mut env: JNIEnv,
    _class: JClass,
    text: JString,
    scale: jfloat,
) -> jstring {
    render_with(&mut env, &text, scale, render_chart_to_svg)
}

/// Render chart text to its drawing commands as JSON.
///
/// Called from Kotlin as:
///   external fun renderJson(text: String, scale: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_chrd_app_ChrdLib_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    text: JString,
    scale: jfloat,
) -> jstring {
    render_with(&mut env, &text, scale, render_chart_to_json)
}
