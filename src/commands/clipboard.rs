//! Clipboard Commands

use wasm_bindgen_futures::JsFuture;

use super::js_error;

/// Write plain text to the system clipboard
pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await.map_err(js_error)?;
    tracing::debug!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}
