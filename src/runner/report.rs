//! Report assembly for one (account, job-kind) run

use chrono::{DateTime, Datelike, Local};

/// Weekday suffix used in the report header
fn weekday_cn(datetime: &DateTime<Local>) -> &'static str {
    const DAYS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];
    DAYS[datetime.weekday().num_days_from_monday() as usize]
}

/// The joined, ordered text summary of one account's one run
///
/// Entries appear in mission execution order, separated by blank lines,
/// framed by a start-time header and an elapsed-time footer. Produced once
/// per run and handed to the notifier exactly once.
#[derive(Debug, Clone)]
pub struct Report {
    started_at: DateTime<Local>,
    elapsed_secs: u64,
    entries: Vec<String>,
}

impl Report {
    pub fn new(started_at: DateTime<Local>, elapsed_secs: u64, entries: Vec<String>) -> Self {
        Self {
            started_at,
            elapsed_secs,
            entries,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Render the push text; empty entries are dropped
    pub fn render(&self) -> String {
        let mut sections = Vec::with_capacity(self.entries.len() + 2);

        sections.push(format!(
            "【开始时间】\n{} 周{}",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            weekday_cn(&self.started_at)
        ));
        sections.extend(self.entries.iter().filter(|e| !e.is_empty()).cloned());
        sections.push(format!("【运行时长】\n时长：{} s", self.elapsed_secs));

        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn monday_noon() -> DateTime<Local> {
        // 2024-05-20 is a Monday
        Local.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn test_render_frames_header_and_footer() {
        let report = Report::new(monday_noon(), 42, vec!["【许愿】".to_string()]);
        let text = report.render();

        assert!(text.starts_with("【开始时间】\n2024-05-20 12:00:00 周一"));
        assert!(text.ends_with("【运行时长】\n时长：42 s"));
        assert!(text.contains("【许愿】"));
    }

    #[test]
    fn test_render_preserves_entry_order() {
        let entries = vec![
            "alpha".to_string(),
            "beta".to_string(),
            "gamma".to_string(),
        ];
        let text = Report::new(monday_noon(), 1, entries).render();

        let a = text.find("alpha").unwrap();
        let b = text.find("beta").unwrap();
        let c = text.find("gamma").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_render_drops_empty_entries() {
        let entries = vec!["kept".to_string(), String::new(), "also kept".to_string()];
        let text = Report::new(monday_noon(), 1, entries).render();

        assert!(text.contains("kept\n\nalso kept"));
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn test_entries_join_with_blank_line() {
        let entries = vec!["one".to_string(), "two".to_string()];
        let text = Report::new(monday_noon(), 1, entries).render();
        assert!(text.contains("one\n\ntwo"));
    }
}
