use anyhow::{Context, Result};
use base64::Engine as _;
use std::fs;
use std::path::Path;

pub fn detect_mime_type<P: AsRef<Path>>(path: P) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("image/jpeg")
        .to_string()
}

pub fn encode_image_to_base64<P: AsRef<Path>>(img_path: P) -> Result<String> {
    let img_path = img_path.as_ref();
    let bytes = fs::read(img_path)
        .with_context(|| format!("Failed to read image file: {}", img_path.display()))?;
    Ok(encode_bytes_to_base64(&bytes))
}

pub fn encode_bytes_to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
