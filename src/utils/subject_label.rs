//! 成绩列表中的科目标签

pub const GENERAL_LABEL: &str = "General";

// 标题关键词 -> 科目名，按顺序匹配第一个
const SINGLE_SUBJECT_KEYWORDS: &[(&str, &str)] = &[
    ("physics", "Physics"),
    ("chemistry", "Chemistry"),
    ("mathematics", "Mathematics"),
    ("maths", "Mathematics"),
    ("math", "Mathematics"),
    ("biology", "Biology"),
    ("botany", "Botany"),
    ("zoology", "Zoology"),
];

fn title_words(title: &str) -> Vec<String> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// 计算科目标签
///
/// 1. 考试有科目记录时用 ", " 连接
/// 2. 否则按考试形式匹配标题：单科取第一个科目关键词，综合识别 PCM / PCB
/// 3. 都不匹配时为 `General`
pub fn subject_label(subjects: &[String], exam_format: &str, title: &str) -> String {
    let names: Vec<&str> = subjects
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !names.is_empty() {
        return names.join(", ");
    }

    let words = title_words(title);
    let has = |w: &str| words.iter().any(|x| x == w);

    let matched = match exam_format {
        "single" => SINGLE_SUBJECT_KEYWORDS
            .iter()
            .find(|(kw, _)| has(kw))
            .map(|(_, name)| *name),
        "comprehensive" => {
            if has("pcm") {
                Some("PCM")
            } else if has("pcb") {
                Some("PCB")
            } else if has("mathematics") || has("maths") || has("math") {
                Some("PCM")
            } else if has("biology") || has("neet") {
                Some("PCB")
            } else {
                None
            }
        }
        _ => None,
    };

    matched.unwrap_or(GENERAL_LABEL).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_recorded_subjects() {
        let subjects = vec!["Physics".to_string(), " Chemistry ".to_string(), "".to_string()];
        assert_eq!(
            subject_label(&subjects, "comprehensive", "anything"),
            "Physics, Chemistry"
        );
    }

    #[test]
    fn test_single_subject_keyword() {
        assert_eq!(subject_label(&[], "single", "Weekly Maths Drill"), "Mathematics");
        assert_eq!(subject_label(&[], "single", "Organic chemistry test"), "Chemistry");
        // "mathematical" 不是关键词
        assert_eq!(subject_label(&[], "single", "Mathematical reasoning"), GENERAL_LABEL);
    }

    #[test]
    fn test_comprehensive_streams() {
        assert_eq!(subject_label(&[], "comprehensive", "JEE PCM Grand Test"), "PCM");
        assert_eq!(subject_label(&[], "comprehensive", "NEET-PCB mock"), "PCB");
        assert_eq!(subject_label(&[], "comprehensive", "Full syllabus test"), GENERAL_LABEL);
    }
}
