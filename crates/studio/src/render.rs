//! Plain-text views for the terminal.

use std::fmt::Write as _;

use reelgen_core::generation::GenerationRecord;
use reelgen_core::history::HistoryEntry;
use reelgen_core::progress::PROGRESS_STEPS;
use reelgen_core::request::VideoStyle;

use crate::session::ProgressUpdate;

const BAR_WIDTH: usize = 30;

/// `[#####.....]  42%  Rendering frames (3/6)  ~12s left`
pub fn progress_line(update: &ProgressUpdate) -> String {
    let filled = (update.progress / 100.0 * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let mut line = format!(
        "[{}{}] {:>3}%  {} ({}/{})",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        update.percent,
        update.step_label,
        update.step_index + 1,
        PROGRESS_STEPS.len(),
    );
    match update.remaining_secs {
        Some(secs) if secs > 0 => {
            let _ = write!(line, "  ~{}s left", secs);
        }
        _ => {
            let _ = write!(line, "  {}s elapsed", update.elapsed_secs);
        }
    }
    line
}

/// Multi-line summary of a finished generation.
pub fn record_summary(record: &GenerationRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generation {} ({})", record.id, record.status);
    if let Some(url) = &record.video_url {
        let _ = writeln!(out, "  video:     {url}");
    }
    if let Some(url) = &record.thumbnail_url {
        let _ = writeln!(out, "  thumbnail: {url}");
    }
    if let Some(meta) = &record.metadata {
        let _ = writeln!(out, "  prompt:    {}", meta.prompt);
        let _ = writeln!(
            out,
            "  settings:  {}s, {}, {}, {}",
            meta.duration,
            meta.aspect_ratio,
            meta.style.label(),
            meta.quality,
        );
        if let Some(secs) = meta.processing_time {
            let _ = writeln!(out, "  took:      {secs}s");
        }
    }
    if let Some(error) = &record.error {
        let _ = writeln!(out, "  error:     {error}");
    }
    out
}

/// One line per history entry, or a placeholder when empty.
pub fn history_table(entries: &[HistoryEntry], filtered: bool) -> String {
    if entries.is_empty() {
        return if filtered {
            "No videos match your filters.\n".to_string()
        } else {
            "No videos yet. Generate one to see it here.\n".to_string()
        };
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {}  {:>2}s  {:<5} {:<11} {}",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.duration,
            entry.aspect_ratio,
            entry.style.label(),
            truncate(&entry.prompt, 60),
        );
    }
    out
}

/// The style presets with their descriptions.
pub fn style_list() -> String {
    let mut out = String::new();
    for style in VideoStyle::ALL {
        let _ = writeln!(out, "{:<12} {}", style.as_str(), style.description());
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use reelgen_core::request::{AspectRatio, Quality};

    use super::*;

    fn update(progress: f64, remaining: Option<u64>) -> ProgressUpdate {
        ProgressUpdate {
            progress,
            percent: progress.round() as u8,
            step_index: reelgen_core::progress::current_step_index(progress),
            step_label: reelgen_core::progress::current_step(progress).label,
            elapsed_secs: 7,
            remaining_secs: remaining,
        }
    }

    fn entry(id: &str, prompt: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            prompt: prompt.into(),
            video_url: "https://cdn.test/v.mp4".into(),
            thumbnail_url: None,
            duration: 12,
            aspect_ratio: AspectRatio::Square,
            style: VideoStyle::Documentary,
            quality: Quality::High,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
            processing_time: Some(50),
        }
    }

    #[test]
    fn progress_line_shows_bar_step_and_remaining_time() {
        let line = progress_line(&update(50.0, Some(12)));
        assert!(line.starts_with(&format!("[{}{}]", "#".repeat(15), ".".repeat(15))));
        assert!(line.contains(" 50%"));
        assert!(line.contains("Adding effects (4/6)"));
        assert!(line.ends_with("~12s left"));
    }

    #[test]
    fn progress_line_falls_back_to_elapsed() {
        assert!(progress_line(&update(100.0, Some(0))).ends_with("7s elapsed"));
        assert!(progress_line(&update(3.0, None)).ends_with("7s elapsed"));
    }

    #[test]
    fn empty_history_message_depends_on_filters() {
        assert!(history_table(&[], false).starts_with("No videos yet"));
        assert!(history_table(&[], true).starts_with("No videos match"));
    }

    #[test]
    fn history_rows_truncate_long_prompts() {
        let long = "x".repeat(80);
        let table = history_table(&[entry("a1", "short"), entry("b2", &long)], false);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("a1  2026-03-01 09:30  12s  1:1"));
        assert!(lines[0].contains("Documentary"));
        assert!(lines[1].ends_with(&format!("{}...", "x".repeat(57))));
    }

    #[test]
    fn style_list_covers_every_style() {
        let list = style_list();
        assert_eq!(list.lines().count(), VideoStyle::ALL.len());
        assert!(list.contains("cinematic"));
    }
}
