use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::{StreamExt, TryStreamExt};
use std::path::Path;

use crate::errors::Result;
use crate::models::announcements::responses::UploadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::object_storage::{ObjectStorage, object_key};
use crate::utils::file_magic::content_type_for;
use crate::utils::validate_magic_bytes;

/// 已读入内存并通过校验的上传文件
#[derive(Debug)]
pub struct ReceivedFile {
    pub original_name: String,
    /// 含点号的小写扩展名，如 ".png"
    pub extension: String,
    pub bytes: Vec<u8>,
}

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 读取名为 `file` 的单个字段
///
/// 依次校验扩展名白名单、首块魔术字节与累计大小，任一失败直接返回 400 响应。
pub async fn receive_single_file(
    payload: &mut Multipart,
    allowed_types: &[String],
    max_size: usize,
) -> std::result::Result<ReceivedFile, HttpResponse> {
    let mut received: Option<ReceivedFile> = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("Malformed multipart payload: {}", e);
                return Err(bad_request(ErrorCode::BadRequest, "Malformed multipart payload"));
            }
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if received.is_some() {
            return Err(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Err(bad_request(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            ));
        }

        let mut bytes: Vec<u8> = Vec::new();
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    tracing::debug!("Upload stream interrupted: {}", e);
                    return Err(bad_request(ErrorCode::FileUploadFailed, "Upload interrupted"));
                }
            };

            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    return Err(bad_request(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    ));
                }
            }

            if bytes.len() + data.len() > max_size {
                return Err(bad_request(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                ));
            }
            bytes.extend_from_slice(&data);
        }

        if bytes.is_empty() {
            return Err(bad_request(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
        }

        received = Some(ReceivedFile {
            original_name,
            extension,
            bytes,
        });
    }

    received.ok_or_else(|| {
        bad_request(ErrorCode::FileNotFound, "No file found in upload payload")
    })
}

/// 按 `{prefix}/{timestamp}-{原文件名}` 写入对象存储
pub async fn store_upload(
    storage: &dyn ObjectStorage,
    prefix: &str,
    file: &ReceivedFile,
) -> Result<UploadResponse> {
    let key = object_key(prefix, &file.original_name, chrono::Utc::now().timestamp());
    let content_type = content_type_for(&file.extension);
    let stored = storage.put(&key, &file.bytes, content_type).await?;

    Ok(UploadResponse {
        key: stored.key,
        url: stored.url,
        size: stored.size as i64,
        content_type: content_type.to_string(),
    })
}
