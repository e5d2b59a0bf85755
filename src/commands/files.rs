//! File Commands
//!
//! Reading picked files and triggering downloads.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, HtmlInputElement, Url};

use super::js_error;

/// Characters left readable in a data URL
const DATA_URL_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Files chosen in an `<input type="file">`; the input is reset so the
/// same file can be picked again
pub fn take_selected_files(ev: &web_sys::Event) -> Vec<File> {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let files = input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default();
    input.set_value("");
    files
}

pub async fn read_file_text(file: &File) -> Result<String, String> {
    let value = JsFuture::from(file.text()).await.map_err(js_error)?;
    value
        .as_string()
        .ok_or_else(|| format!("{} is not readable as text", file.name()))
}

/// Save `content` through a temporary object URL
pub fn download_blob(filename: &str, mime: &str, content: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;
    let result = click_link(&url, filename);
    let _ = Url::revoke_object_url(&url);
    result
}

/// Save a single plain-text document through a data URL
pub fn download_text(filename: &str, content: &str) -> Result<(), String> {
    click_link(&text_data_url(content), filename)
}

pub fn text_data_url(content: &str) -> String {
    format!(
        "data:text/plain;charset=utf-8,{}",
        utf8_percent_encode(content, DATA_URL_SET)
    )
}

fn click_link(href: &str, filename: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "Failed to create link".to_string())?;
    anchor.set_href(href);
    anchor.set_download(filename);
    anchor.click();
    tracing::info!("Downloaded {}", filename);
    Ok(())
}

/// `name.ext` → `name.txt` for single-document export
pub fn as_txt_name(name: &str) -> String {
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    let stem = stem.trim();
    if stem.is_empty() {
        "untitled.txt".to_string()
    } else {
        format!("{}.txt", stem)
    }
}
