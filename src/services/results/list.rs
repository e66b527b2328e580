use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::errors::Result;
use crate::models::results::entities::ResultRow;
use crate::models::results::requests::ResultsParams;
use crate::models::results::responses::ResultListResponse;
use crate::models::ApiResponse;
use crate::services::error_response;

fn matches_filter(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(wanted) => value.is_some_and(|v| v.trim().eq_ignore_ascii_case(wanted)),
    }
}

/// 排名在日期与考试范围内算好之后再按省份、地区过滤，过滤不影响名次
pub(crate) fn filter_by_region(rows: Vec<ResultRow>, params: &ResultsParams) -> Vec<ResultRow> {
    rows.into_iter()
        .filter(|row| {
            matches_filter(row.state.as_deref(), params.state.as_deref())
                && matches_filter(row.district.as_deref(), params.district.as_deref())
        })
        .collect()
}

/// 查询并过滤成绩行，列表与导出共用
pub(crate) async fn load_rows(
    service: &ResultService,
    request: &HttpRequest,
    params: &ResultsParams,
) -> Result<Vec<ResultRow>> {
    let window = params.window()?;
    let rows = service.get_storage(request).list_results(window).await?;
    Ok(filter_by_region(rows, params))
}

pub async fn list_results(
    service: &ResultService,
    request: &HttpRequest,
    params: ResultsParams,
) -> ActixResult<HttpResponse> {
    match load_rows(service, request, &params).await {
        Ok(items) => {
            let total = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ResultListResponse { items, total },
                "Results retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, state: Option<&str>, district: Option<&str>) -> ResultRow {
        ResultRow {
            student_exam_id: id,
            user_id: id,
            username: format!("student{id}"),
            student_name: None,
            student_id: None,
            state: state.map(Into::into),
            district: district.map(Into::into),
            exam_id: 1,
            exam_title: "Mock Test".into(),
            exam_type: "NEET".into(),
            exam_format: "comprehensive".into(),
            total_marks: 720,
            subject: "PCB".into(),
            score: 600.0,
            percentage: Some(83.33),
            completed_at: None,
            exam_rank: id,
            state_rank: 1,
            district_rank: 1,
            overall_rank: id,
        }
    }

    #[test]
    fn test_region_filter_keeps_ranks() {
        let rows = vec![
            row(1, Some("Kerala"), Some("Ernakulam")),
            row(2, Some("Tamil Nadu"), Some("Chennai")),
            row(3, Some("kerala"), Some("Thrissur")),
            row(4, None, None),
        ];

        let params = ResultsParams {
            state: Some(" Kerala ".into()),
            ..Default::default()
        };
        let kept = filter_by_region(rows.clone(), &params);
        assert_eq!(kept.iter().map(|r| r.exam_rank).collect::<Vec<_>>(), vec![1, 3]);

        let params = ResultsParams {
            state: Some("Kerala".into()),
            district: Some("Thrissur".into()),
            ..Default::default()
        };
        assert_eq!(filter_by_region(rows.clone(), &params).len(), 1);

        assert_eq!(filter_by_region(rows, &ResultsParams::default()).len(), 4);
    }
}
