use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

use super::{PreviousQuestionService, previous_question_not_found};
use crate::config::AppConfig;
use crate::errors::{ExamAdminError, Result};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_storage::is_safe_key;
use crate::services::error_response;
use crate::services::uploads::object_storage_from;
use crate::utils::file_magic::content_type_for;

/// 真题资源所在位置
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ResourceLocation {
    /// 本站对象存储中的 key
    Local(String),
    Remote(url::Url),
}

/// 本站上传路径映射为对象 key，其余 http(s) 地址走远程抓取
pub(crate) fn resolve_location(
    resource_url: &str,
    public_base_url: &str,
) -> Option<ResourceLocation> {
    let base = format!("{}/", public_base_url.trim_end_matches('/'));
    if let Some(rest) = resource_url.strip_prefix(&base) {
        let key = rest.split(['?', '#']).next().unwrap_or_default();
        return is_safe_key(key).then(|| ResourceLocation::Local(key.to_string()));
    }

    let url = url::Url::parse(resource_url).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(ResourceLocation::Remote(url))
}

fn extension_of(path: &str) -> String {
    path.rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

fn file_name_of(path: &str) -> String {
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("resource")
        .to_string()
}

/// 回环、私有、链路本地等地址不允许由服务端代为访问
fn is_internal_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                // 100.64.0.0/10
                || (a == 100 && (b & 0xc0) == 64)
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80
                || v6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_internal_ip(IpAddr::V4(v4)))
        }
    }
}

fn is_internal_host(host: Option<url::Host<&str>>) -> bool {
    match host {
        Some(url::Host::Ipv4(ip)) => is_internal_ip(IpAddr::V4(ip)),
        Some(url::Host::Ipv6(ip)) => is_internal_ip(IpAddr::V6(ip)),
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        None => true,
    }
}

/// 域名解析出的任一地址落在内网即拒绝
async fn ensure_public_host(url: &url::Url) -> Result<()> {
    let blocked = || ExamAdminError::remote_fetch("Remote host is not publicly routable");
    if is_internal_host(url.host()) {
        return Err(blocked());
    }

    if let Some(url::Host::Domain(domain)) = url.host() {
        let port = url.port_or_known_default().unwrap_or(80);
        let addrs: Vec<IpAddr> = tokio::net::lookup_host((domain, port))
            .await
            .map_err(|e| ExamAdminError::remote_fetch(format!("Failed to resolve {domain}: {e}")))?
            .map(|addr| addr.ip())
            .collect();
        if addrs.is_empty() || addrs.into_iter().any(is_internal_ip) {
            return Err(blocked());
        }
    }
    Ok(())
}

/// 抓取远程资源，超过上限即中止
async fn fetch_remote(
    url: &url::Url,
    timeout: Duration,
    max_bytes: usize,
) -> Result<(Vec<u8>, Option<String>)> {
    ensure_public_host(url).await?;

    // 跳转目标同样不能指向内网
    let redirect_policy = reqwest::redirect::Policy::custom(|attempt| {
        if attempt.previous().len() >= 5 {
            attempt.error("too many redirects")
        } else if is_internal_host(attempt.url().host()) {
            attempt.stop()
        } else {
            attempt.follow()
        }
    });
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .redirect(redirect_policy)
        .build()?;
    let response = client.get(url.clone()).send().await?.error_for_status()?;

    if let Some(length) = response.content_length()
        && length as usize > max_bytes
    {
        return Err(ExamAdminError::remote_fetch(format!(
            "Remote resource is {length} bytes, limit is {max_bytes}"
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ExamAdminError::remote_fetch(format!(
                "Remote resource exceeds {max_bytes} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok((bytes, content_type))
}

pub async fn download_previous_question(
    service: &PreviousQuestionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let set = match storage.get_previous_question(id).await {
        Ok(Some(set)) => set,
        Ok(None) => return Ok(previous_question_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    let Some(location) =
        resolve_location(&set.resource_url, &config.object_storage.public_base_url)
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Resource is not downloadable",
        )));
    };

    let (bytes, content_type, file_name) = match location {
        ResourceLocation::Local(key) => {
            let object_storage = object_storage_from(request);
            match object_storage.get(&key).await {
                Ok(Some(bytes)) => {
                    let content_type = content_type_for(&extension_of(&key)).to_string();
                    (bytes, content_type, file_name_of(&key))
                }
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::FileNotFound,
                        "File not found",
                    )));
                }
                Err(e) => return Ok(error_response(&e)),
            }
        }
        ResourceLocation::Remote(url) => {
            debug!("Proxying previous question set {} from {}", id, url);
            match fetch_remote(&url, config.proxy_timeout(), config.proxy.max_bytes).await {
                Ok((bytes, content_type)) => {
                    let content_type = content_type.unwrap_or_else(|| {
                        content_type_for(&extension_of(url.path())).to_string()
                    });
                    (bytes, content_type, file_name_of(url.path()))
                }
                Err(e) => return Ok(error_response(&e)),
            }
        }
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_location() {
        assert_eq!(
            resolve_location("/uploads/documents/1-jee.pdf", "/uploads"),
            Some(ResourceLocation::Local("documents/1-jee.pdf".into()))
        );
        assert_eq!(resolve_location("/uploads/../secret", "/uploads/"), None);
        assert!(matches!(
            resolve_location("https://example.com/papers/neet.pdf", "/uploads"),
            Some(ResourceLocation::Remote(_))
        ));
        assert_eq!(resolve_location("ftp://example.com/a.pdf", "/uploads"), None);
        assert_eq!(resolve_location("/static/a.pdf", "/uploads"), None);
    }

    #[test]
    fn test_file_name_and_extension() {
        assert_eq!(extension_of("/papers/2024.PDF"), ".pdf");
        assert_eq!(extension_of("/download"), "");
        assert_eq!(file_name_of("/papers/2024.pdf"), "2024.pdf");
        assert_eq!(file_name_of("/"), "resource");
    }

    #[test]
    fn test_internal_addresses() {
        let internal = [
            "127.0.0.1",
            "10.1.2.3",
            "172.16.0.5",
            "192.168.1.1",
            "169.254.169.254",
            "100.64.0.1",
            "0.0.0.0",
            "::1",
            "fd00::1",
            "fe80::1",
            "::ffff:10.0.0.1",
        ];
        for ip in internal {
            assert!(is_internal_ip(ip.parse().unwrap()), "{ip}");
        }
        for ip in ["8.8.8.8", "1.1.1.1", "2606:4700:4700::1111"] {
            assert!(!is_internal_ip(ip.parse().unwrap()), "{ip}");
        }
    }

    #[tokio::test]
    async fn test_remote_fetch_refuses_internal_hosts() {
        let urls = [
            "http://127.0.0.1:8080/paper.pdf",
            "http://169.254.169.254/latest/meta-data",
            "http://[::1]/a.pdf",
            "http://LOCALHOST/a.pdf",
        ];
        for raw in urls {
            let url = url::Url::parse(raw).unwrap();
            let err = fetch_remote(&url, Duration::from_secs(1), 1024).await.unwrap_err();
            assert!(matches!(err, ExamAdminError::RemoteFetch(_)), "{raw}");
        }
    }
}
