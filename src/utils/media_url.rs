//! 公告媒体链接的规范化与校验

use url::Url;

use crate::errors::{ExamAdminError, Result};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg"];
pub const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

/// 解开 Google 跳转包装（`/url?q=`、`/url?url=`、`/imgres?imgurl=`），其他链接原样返回
pub fn unwrap_redirect(url: &Url) -> Option<Url> {
    let host = url.host_str()?;
    if !(host == "google.com" || host.starts_with("google.") || host.contains(".google.")) {
        return None;
    }

    let wanted: &[&str] = match url.path() {
        "/url" => &["q", "url"],
        "/imgres" => &["imgurl"],
        _ => return None,
    };
    url.query_pairs()
        .find(|(k, _)| wanted.contains(&k.as_ref()))
        .and_then(|(_, v)| Url::parse(&v).ok())
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| ExamAdminError::validation(format!("Invalid URL: {raw}")))?;
    let url = unwrap_redirect(&url).unwrap_or(url);
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ExamAdminError::validation(format!(
            "Unsupported URL scheme: {other}"
        ))),
    }
}

fn path_extension(path: &str) -> Option<String> {
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

fn host_matches(host: &str, allowed: &str) -> bool {
    host == allowed || host.ends_with(&format!(".{allowed}"))
}

/// 图片链接：http(s) 或本站上传路径（以 `/` 开头），扩展名在白名单内
///
/// 空串视为未设置，返回 `Ok(None)`。
pub fn normalize_media_url(raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let (normalized, path) = if raw.starts_with('/') && !raw.starts_with("//") {
        (raw.to_string(), raw.split(['?', '#']).next().unwrap_or(raw).to_string())
    } else {
        let url = parse_http_url(raw)?;
        let path = url.path().to_string();
        (url.to_string(), path)
    };

    match path_extension(&path) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(Some(normalized)),
        _ => Err(ExamAdminError::validation(format!(
            "Media URL must point to an image ({})",
            IMAGE_EXTENSIONS.join(", ")
        ))),
    }
}

/// 视频链接：视频文件扩展名，或托管在 YouTube / Vimeo（含子域名）
pub fn normalize_video_url(raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if raw.starts_with('/') && !raw.starts_with("//") {
        let path = raw.split(['?', '#']).next().unwrap_or(raw);
        return match path_extension(path) {
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => Ok(Some(raw.to_string())),
            _ => Err(ExamAdminError::validation("Video URL must point to a video file")),
        };
    }

    let url = parse_http_url(raw)?;
    let hosted = url
        .host_str()
        .is_some_and(|host| VIDEO_HOSTS.iter().any(|allowed| host_matches(host, allowed)));
    let is_file = path_extension(url.path())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()));

    if hosted || is_file {
        Ok(Some(url.to_string()))
    } else {
        Err(ExamAdminError::validation(format!(
            "Video URL must be a {} file or hosted on {}",
            VIDEO_EXTENSIONS.join("/"),
            VIDEO_HOSTS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension_whitelist() {
        assert_eq!(
            normalize_media_url("https://cdn.example.com/banner.PNG").unwrap(),
            Some("https://cdn.example.com/banner.PNG".to_string())
        );
        assert!(normalize_media_url("https://cdn.example.com/banner.bmp").is_err());
        assert!(normalize_media_url("https://cdn.example.com/banner").is_err());
        assert_eq!(normalize_media_url("  ").unwrap(), None);
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(normalize_media_url("ftp://example.com/a.png").is_err());
        assert!(normalize_media_url("javascript:alert(1)//a.png").is_err());
        assert!(normalize_media_url("//evil.example.com/a.png").is_err());
    }

    #[test]
    fn test_uploaded_path_accepted() {
        assert_eq!(
            normalize_media_url("/uploads/1718000000-poster.webp").unwrap(),
            Some("/uploads/1718000000-poster.webp".to_string())
        );
    }

    #[test]
    fn test_unwraps_google_redirects() {
        let wrapped = "https://www.google.com/url?sa=i&url=https%3A%2F%2Fimages.example.org%2Fposter.jpg&source=images";
        assert_eq!(
            normalize_media_url(wrapped).unwrap(),
            Some("https://images.example.org/poster.jpg".to_string())
        );

        let imgres = "https://www.google.co.in/imgres?imgurl=https://example.org/a/b.gif&imgrefurl=x";
        assert_eq!(
            normalize_media_url(imgres).unwrap(),
            Some("https://example.org/a/b.gif".to_string())
        );
    }

    #[test]
    fn test_video_hosts_and_files() {
        assert!(normalize_video_url("https://www.youtube.com/watch?v=abc").unwrap().is_some());
        assert!(normalize_video_url("https://youtu.be/abc").unwrap().is_some());
        assert!(normalize_video_url("https://player.vimeo.com/video/1").unwrap().is_some());
        assert!(normalize_video_url("https://cdn.example.com/intro.webm").unwrap().is_some());
        assert!(normalize_video_url("https://notyoutube.com/watch").is_err());
        assert!(normalize_video_url("https://cdn.example.com/intro.avi").is_err());
    }
}
