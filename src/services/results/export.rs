//! 成绩导出（CSV / XLSX），行与列表接口一致

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

use super::ResultService;
use super::list::load_rows;
use crate::errors::{ExamAdminError, Result};
use crate::models::results::entities::ResultRow;
use crate::models::results::requests::{ExportFormat, ResultsExportParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

const HEADERS: [&str; 16] = [
    "Overall Rank",
    "Exam Rank",
    "State Rank",
    "District Rank",
    "Student Name",
    "Username",
    "Student ID",
    "State",
    "District",
    "Exam",
    "Exam Type",
    "Subject",
    "Score",
    "Total Marks",
    "Percentage",
    "Completed At",
];

fn text_cells(row: &ResultRow) -> [String; 16] {
    [
        row.overall_rank.to_string(),
        row.exam_rank.to_string(),
        row.state_rank.to_string(),
        row.district_rank.to_string(),
        row.student_name.clone().unwrap_or_default(),
        row.username.clone(),
        row.student_id.clone().unwrap_or_default(),
        row.state.clone().unwrap_or_default(),
        row.district.clone().unwrap_or_default(),
        row.exam_title.clone(),
        row.exam_type.clone(),
        row.subject.clone(),
        row.score.to_string(),
        row.total_marks.to_string(),
        row.percentage.map(|p| format!("{p:.2}")).unwrap_or_default(),
        row.completed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
    ]
}

pub(crate) fn render_csv(rows: &[ResultRow]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADERS)
        .map_err(|e| ExamAdminError::serialization(format!("CSV write failed: {e}")))?;
    for row in rows {
        wtr.write_record(text_cells(row))
            .map_err(|e| ExamAdminError::serialization(format!("CSV write failed: {e}")))?;
    }
    wtr.into_inner()
        .map_err(|e| ExamAdminError::serialization(format!("CSV flush failed: {e}")))
}

pub(crate) fn render_xlsx(rows: &[ResultRow]) -> Result<Vec<u8>> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| {
        ExamAdminError::serialization(format!("XLSX write failed: {e}"))
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Results").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        // 名次与分数写成数字，其余写文本
        worksheet.write_number(r, 0, row.overall_rank as f64).map_err(xlsx_err)?;
        worksheet.write_number(r, 1, row.exam_rank as f64).map_err(xlsx_err)?;
        worksheet.write_number(r, 2, row.state_rank as f64).map_err(xlsx_err)?;
        worksheet.write_number(r, 3, row.district_rank as f64).map_err(xlsx_err)?;
        let cells = text_cells(row);
        for col in 4..12 {
            worksheet
                .write_string(r, col as u16, &cells[col])
                .map_err(xlsx_err)?;
        }
        worksheet.write_number(r, 12, row.score).map_err(xlsx_err)?;
        worksheet
            .write_number(r, 13, row.total_marks as f64)
            .map_err(xlsx_err)?;
        if let Some(p) = row.percentage {
            worksheet.write_number(r, 14, p).map_err(xlsx_err)?;
        }
        worksheet.write_string(r, 15, &cells[15]).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

pub async fn export_results(
    service: &ResultService,
    request: &HttpRequest,
    params: ResultsExportParams,
) -> ActixResult<HttpResponse> {
    let rows = match load_rows(service, request, &params.filters()).await {
        Ok(rows) => rows,
        Err(e) => return Ok(error_response(&e)),
    };

    let stamp = chrono::Utc::now().format("%Y%m%d");
    let (rendered, content_type, file_name) = match params.format {
        ExportFormat::Csv => (
            render_csv(&rows),
            "text/csv; charset=utf-8",
            format!("results-{stamp}.csv"),
        ),
        ExportFormat::Xlsx => (
            render_xlsx(&rows),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            format!("results-{stamp}.xlsx"),
        ),
    };

    match rendered {
        Ok(data) => Ok(HttpResponse::Ok()
            .content_type(content_type)
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(data)),
        Err(e) => {
            error!("Results export failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    "Failed to export results",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ResultRow {
        ResultRow {
            student_exam_id: 1,
            user_id: 10,
            username: "anu".into(),
            student_name: Some("Anu, K".into()),
            student_id: Some("KL-001".into()),
            state: Some("Kerala".into()),
            district: Some("Ernakulam".into()),
            exam_id: 3,
            exam_title: "NEET Mock 1".into(),
            exam_type: "NEET".into(),
            exam_format: "comprehensive".into(),
            total_marks: 720,
            subject: "Physics, Chemistry, Biology".into(),
            score: 612.0,
            percentage: Some(85.0),
            completed_at: None,
            exam_rank: 1,
            state_rank: 1,
            district_rank: 1,
            overall_rank: 2,
        }
    }

    #[test]
    fn test_csv_quotes_fields() {
        let data = render_csv(&[row()]).unwrap();
        let text = String::from_utf8(data).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Overall Rank,Exam Rank"));
        let line = lines.next().unwrap();
        assert!(line.starts_with("2,1,1,1,\"Anu, K\",anu,KL-001"));
        assert!(line.contains("\"Physics, Chemistry, Biology\""));
        assert!(line.contains(",85.00,"));
    }

    #[test]
    fn test_xlsx_is_zip() {
        let data = render_xlsx(&[row()]).unwrap();
        assert!(data.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }
}
