use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{ExamAdminError, Result};
use crate::models::common::deserialize_optional_i64;

// 成绩查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultsParams {
    /// 起始日期（含），YYYY-MM-DD
    pub from: Option<String>,
    /// 截止日期（含），YYYY-MM-DD
    pub to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub exam_id: Option<i64>,
    pub state: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

// 成绩导出参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultsExportParams {
    #[serde(default)]
    pub format: ExportFormat,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub exam_id: Option<i64>,
    pub state: Option<String>,
    pub district: Option<String>,
}

impl ResultsExportParams {
    pub fn filters(&self) -> ResultsParams {
        ResultsParams {
            from: self.from.clone(),
            to: self.to.clone(),
            exam_id: self.exam_id,
            state: self.state.clone(),
            district: self.district.clone(),
        }
    }
}

/// 解析后的时间窗口，秒级时间戳，左闭右开
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultsWindow {
    pub from_ts: Option<i64>,
    pub to_ts: Option<i64>,
    pub exam_id: Option<i64>,
}

impl ResultsParams {
    /// 把日期解析为时间戳，to 为当天结束
    pub fn window(&self) -> Result<ResultsWindow> {
        let parse = |label: &str, value: &Option<String>| -> Result<Option<chrono::NaiveDate>> {
            match value.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(Some)
                    .map_err(|_| {
                        ExamAdminError::validation(format!(
                            "'{label}' must be a date in YYYY-MM-DD format"
                        ))
                    }),
            }
        };

        let from = parse("from", &self.from)?;
        let to = parse("to", &self.to)?;
        if let (Some(f), Some(t)) = (from, to)
            && f > t
        {
            return Err(ExamAdminError::validation("'from' must not be after 'to'"));
        }

        let day_start = |d: chrono::NaiveDate| d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();

        Ok(ResultsWindow {
            from_ts: from.map(day_start),
            to_ts: to.and_then(|d| d.succ_opt()).map(day_start),
            exam_id: self.exam_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let params = ResultsParams {
            from: Some("2025-01-01".into()),
            to: Some("2025-01-31".into()),
            ..Default::default()
        };
        let w = params.window().unwrap();
        assert_eq!(w.from_ts, Some(1_735_689_600));
        // 1 月 31 日整天都包含在内
        assert_eq!(w.to_ts, Some(1_738_368_000));
    }

    #[test]
    fn test_window_rejects_inverted_or_malformed() {
        let inverted = ResultsParams {
            from: Some("2025-02-01".into()),
            to: Some("2025-01-01".into()),
            ..Default::default()
        };
        assert!(inverted.window().is_err());

        let malformed = ResultsParams {
            from: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(malformed.window().is_err());

        assert_eq!(ResultsParams::default().window().unwrap(), ResultsWindow::default());
    }
}
