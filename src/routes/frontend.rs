//! 管理端 SPA 静态资源
//!
//! 构建产物由 rust-embed 在编译期嵌入，未命中的非 API 路径一律回落到 `index.html`。
//! `frontend.override_dir` 非空时先查该目录。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::{Component, Path};

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::content_type_for;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct AdminAssets;

const INDEX: &str = "index.html";

fn extension_of(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn asset_mime(path: &str) -> &'static str {
    match extension_of(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" | "webmanifest" => "application/json; charset=utf-8",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        ext => content_type_for(&format!(".{ext}")),
    }
}

/// 打包器输出到 `assets/` 的文件名带内容哈希，可永久缓存
fn is_fingerprinted(path: &str) -> bool {
    path.starts_with("assets/") && !path.ends_with(".html")
}

/// 落到这里的 `/api` 请求说明接口不存在，不能回落成页面
fn is_api_path(path: &str) -> bool {
    path == "api" || path.starts_with("api/")
}

/// 覆盖目录只接受普通路径段
fn is_safe_relative(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

fn load_asset(config: &AppConfig, path: &str) -> Option<Cow<'static, [u8]>> {
    let override_dir = config.frontend.override_dir.trim();
    if !override_dir.is_empty() && is_safe_relative(path) {
        if let Ok(bytes) = std::fs::read(Path::new(override_dir).join(path)) {
            return Some(Cow::Owned(bytes));
        }
    }
    AdminAssets::get(path).map(|file| file.data)
}

fn render_index(content: &[u8], base_path: &str) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%BASE_PATH%", base_path.trim_end_matches('/'))
        .into_bytes()
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');
    if is_api_path(path) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "API endpoint not found",
        )));
    }

    let config = AppConfig::get();
    let requested = if path.is_empty() { INDEX } else { path };

    let (file_path, content) = match load_asset(config, requested) {
        Some(content) => (requested, content),
        None => match load_asset(config, INDEX) {
            Some(content) => (INDEX, content),
            None => {
                tracing::warn!("Admin UI bundle missing, cannot serve {}", requested);
                return Ok(HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body("<!DOCTYPE html><title>Exam Admin</title><h1>Admin UI not built</h1>"));
            }
        },
    };

    let mime = asset_mime(file_path);
    let mut response = HttpResponse::Ok();
    response.content_type(mime);
    if is_fingerprinted(file_path) {
        response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
    } else {
        response.insert_header(("Cache-Control", "no-cache"));
    }

    if file_path == INDEX {
        return Ok(response.body(render_index(&content, &config.frontend.base_path)));
    }
    Ok(response.body(content.into_owned()))
}

/// 放在所有 API 路由之后注册
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_mime() {
        assert_eq!(asset_mime("index.html"), "text/html; charset=utf-8");
        assert_eq!(asset_mime("assets/app-1a2b.js"), "application/javascript; charset=utf-8");
        assert_eq!(asset_mime("logo.png"), "image/png");
        assert_eq!(asset_mime("noext"), "application/octet-stream");
    }

    #[test]
    fn test_cache_and_routing_rules() {
        assert!(is_fingerprinted("assets/index-9f8e.css"));
        assert!(!is_fingerprinted("favicon.ico"));
        assert!(is_api_path("api/exams/unknown"));
        assert!(!is_api_path("apis"));
        assert!(!is_api_path("exams/12"));
    }

    #[test]
    fn test_override_paths_reject_traversal() {
        assert!(is_safe_relative("assets/app.js"));
        assert!(!is_safe_relative("../secrets.toml"));
        assert!(!is_safe_relative("/etc/passwd"));
    }

    #[test]
    fn test_render_index_base_path() {
        let html = b"<script src=\"%BASE_PATH%/assets/app.js\"></script>";
        let out = String::from_utf8(render_index(html, "/admin/")).unwrap();
        assert_eq!(out, "<script src=\"/admin/assets/app.js\"></script>");
    }
}
