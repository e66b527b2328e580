/// 校验文件头魔术字节是否与扩展名一致
///
/// `extension` 含点号，如 ".png"，大小写不敏感。未知扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 图片
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        ".svg" => looks_like_svg(data),

        // 视频
        ".mp4" => data.len() >= 8 && &data[4..8] == b"ftyp",
        ".webm" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),
        ".ogg" => data.starts_with(b"OggS"),

        // 文档
        ".pdf" => data.starts_with(b"%PDF"),
        // OLE 复合文档
        ".doc" | ".xls" | ".ppt" => {
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        // OOXML (zip)
        ".docx" | ".xlsx" | ".pptx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        _ => false,
    }
}

// SVG 是文本，跳过 BOM 与空白后应以 <svg 或带 <svg 的 XML 声明开头
fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    let head = head.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(head);
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// 根据扩展名推断 Content-Type
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        ".mp4" => "video/mp4",
        ".webm" => "video/webm",
        ".ogg" => "video/ogg",
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xls" => "application/vnd.ms-excel",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".ppt" => "application/vnd.ms-powerpoint",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_video_magic() {
        let mp4 = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&mp4, ".mp4"));
        assert!(!validate_magic_bytes(&mp4, ".webm"));
        assert!(validate_magic_bytes(&[0x1A, 0x45, 0xDF, 0xA3, 0x01], ".webm"));
        assert!(validate_magic_bytes(b"OggS\x00\x02", ".ogg"));
    }

    #[test]
    fn test_svg_detection() {
        assert!(validate_magic_bytes(b"  <svg xmlns=\"http://www.w3.org/2000/svg\"/>", ".svg"));
        assert!(validate_magic_bytes(b"<?xml version=\"1.0\"?><svg/>", ".svg"));
        assert!(!validate_magic_bytes(b"GIF89a....", ".svg"));
    }

    #[test]
    fn test_office_and_pdf() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".pptx"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".docx"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".png"));
        assert!(!validate_magic_bytes(b"BM....", ".bmp"));
        assert!(!validate_magic_bytes(&[0x00, 0x01], ".exe"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(".JPG"), "image/jpeg");
        assert_eq!(content_type_for(".bin"), "application/octet-stream");
    }
}
