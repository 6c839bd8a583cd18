use jiff::{Timestamp, tz};
use payloads::requests::LogoUpload;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Read a picked file into a logo upload.
pub async fn read_logo(file: web_sys::File) -> Result<LogoUpload, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(LogoUpload::Replace {
        file_name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

/// Creation date in the browser's timezone.
pub fn format_date(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(tz::TimeZone::system())
        .strftime("%d.%m.%Y")
        .to_string()
}

/// Returns true if the application is running in development mode.
/// Checks if BACKEND_URL contains "localhost".
pub fn is_dev_mode() -> bool {
    option_env!("BACKEND_URL").is_some_and(|url| url.contains("localhost"))
}
