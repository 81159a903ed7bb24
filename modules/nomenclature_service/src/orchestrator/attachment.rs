//! Data-URL encoding of uploaded images and logos

use crate::contract::NomenclatureError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Default cap on the raw file size, checked before encoding
pub const MAX_ATTACHMENT_BYTES: usize = 2 * 1024 * 1024;

const MIB: usize = 1024 * 1024;

/// Encode a file as `data:<mime>;base64,<payload>`
pub fn encode_attachment(
    mime: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<String, NomenclatureError> {
    if bytes.len() > max_bytes {
        return Err(NomenclatureError::validation(too_large(max_bytes)));
    }

    let mime = match mime.trim() {
        "" => "application/octet-stream",
        mime => mime,
    };
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

fn too_large(max_bytes: usize) -> String {
    if max_bytes >= MIB && max_bytes % MIB == 0 {
        format!("Файлът е твърде голям (макс {}MB).", max_bytes / MIB)
    } else {
        format!("Файлът е твърде голям (макс {} KB).", max_bytes.div_ceil(1024))
    }
}
