use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PreviousQuestionService, previous_question_not_found};
use crate::models::ApiResponse;
use crate::models::previous_questions::entities::{PreviousQuestionSet, ResourceKind};
use crate::models::previous_questions::responses::PreviewResponse;
use crate::services::error_response;

const OFFICE_VIEWER: &str = "https://view.officeapps.live.com/op/embed.aspx";

/// 图片与 PDF 经本服务代理内嵌，Office 文档交给 Office Online 渲染
pub(crate) fn build_preview(set: &PreviousQuestionSet, origin: &str) -> PreviewResponse {
    let kind = ResourceKind::classify(&set.resource_url);
    let (viewer_url, proxied) = match kind {
        ResourceKind::Image | ResourceKind::Pdf => (
            format!("/api/previous-questions/{}/download", set.id),
            true,
        ),
        ResourceKind::Office => {
            // 在线查看器需要能公网访问的绝对地址
            let absolute = if set.resource_url.starts_with('/') {
                format!("{}{}", origin.trim_end_matches('/'), set.resource_url)
            } else {
                set.resource_url.clone()
            };
            let encoded: String =
                url::form_urlencoded::byte_serialize(absolute.as_bytes()).collect();
            (format!("{OFFICE_VIEWER}?src={encoded}"), false)
        }
        ResourceKind::Other => (set.resource_url.clone(), false),
    };

    PreviewResponse {
        id: set.id,
        kind,
        viewer_url,
        proxied,
        resource_url: set.resource_url.clone(),
    }
}

pub async fn preview_previous_question(
    service: &PreviousQuestionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let set = match storage.get_previous_question(id).await {
        Ok(Some(set)) => set,
        Ok(None) => return Ok(previous_question_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    let origin = {
        let info = request.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        build_preview(&set, &origin),
        "Preview generated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::previous_questions::entities::SubjectMode;

    fn set(resource_url: &str) -> PreviousQuestionSet {
        let now = chrono::Utc::now();
        PreviousQuestionSet {
            id: 7,
            course: "NEET".into(),
            subject_mode: SubjectMode::Single,
            subjects: vec!["Biology".into()],
            exam_conducted_on: None,
            resource_url: resource_url.into(),
            notes: None,
            uploaded_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_pdf_and_image_are_proxied() {
        let preview = build_preview(&set("https://example.com/neet-2023.pdf"), "http://localhost");
        assert_eq!(preview.kind, ResourceKind::Pdf);
        assert!(preview.proxied);
        assert_eq!(preview.viewer_url, "/api/previous-questions/7/download");

        let preview = build_preview(&set("/uploads/documents/1-page.png"), "http://localhost");
        assert_eq!(preview.kind, ResourceKind::Image);
        assert!(preview.proxied);
    }

    #[test]
    fn test_office_uses_embed_viewer() {
        let preview = build_preview(&set("/uploads/documents/1-paper.docx"), "https://exams.example.com/");
        assert_eq!(preview.kind, ResourceKind::Office);
        assert!(!preview.proxied);
        assert_eq!(
            preview.viewer_url,
            "https://view.officeapps.live.com/op/embed.aspx?src=https%3A%2F%2Fexams.example.com%2Fuploads%2Fdocuments%2F1-paper.docx"
        );
    }

    #[test]
    fn test_other_links_pass_through() {
        let preview = build_preview(&set("https://drive.example.com/view?id=1"), "http://localhost");
        assert_eq!(preview.kind, ResourceKind::Other);
        assert_eq!(preview.viewer_url, "https://drive.example.com/view?id=1");
    }
}
