// HTML rendering of the dashboard view state
use crate::domain::automation::Automation;
use crate::domain::chart::ChartData;
use crate::domain::dashboard::DashboardState;
use crate::domain::memory::MemorySummary;
use crate::domain::overview::Overview;
use crate::domain::session::Sessions;
use crate::domain::tasks::TaskList;
use crate::domain::token_usage::TokenMetrics;
use crate::presentation::chart_svg::render_line_chart;
use chrono::{DateTime, NaiveDateTime, TimeZone};
use std::fmt::Display;

const TITLE: &str = "🦞 OpenClaw BI Dashboard";
const CLOCK_FORMAT: &str = "%-I:%M:%S %p";
const INVALID_DATE: &str = "Invalid Date";

const STYLESHEET: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: #09090b; color: #e4e4e7; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; font-size: 14px; }
.loading { display: flex; align-items: center; justify-content: center; height: 100vh; color: #a1a1aa; }
.dashboard { max-width: 1200px; margin: 0 auto; padding: 24px; }
header { display: flex; align-items: center; justify-content: space-between; margin-bottom: 24px; }
.status-badge { padding: 4px 12px; border-radius: 999px; background: #052e16; color: #4ade80; font-size: 12px; }
.grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px; }
.card { background: #18181b; border: 1px solid #27272a; border-radius: 8px; padding: 16px; }
.card.wide { grid-column: span 2; }
.card h2 { font-size: 15px; margin-bottom: 12px; color: #a1a1aa; }
.metrics { display: flex; gap: 24px; }
.metric { display: flex; flex-direction: column; }
.metric .label { color: #71717a; font-size: 12px; }
.metric .value { font-size: 20px; font-weight: 600; }
.legend { display: flex; gap: 16px; font-size: 12px; margin-top: 4px; }
.task-item, .cron-item, .memory-item { padding: 8px 0; border-bottom: 1px solid #27272a; }
.task-header, .cron-item, .memory-item { display: flex; justify-content: space-between; gap: 8px; }
.task-status { font-size: 12px; padding: 2px 8px; border-radius: 4px; background: #27272a; }
.status-in-progress { color: #60a5fa; }
.task-meta, .cron-schedule, .memory-size { color: #71717a; font-size: 12px; }
.progress-bar { height: 6px; background: #27272a; border-radius: 3px; margin-top: 6px; }
.progress-fill { height: 100%; background: #3b82f6; border-radius: 3px; }
.cron-status.active { color: #10b981; }
.cron-status.paused, .cron-status.disabled { color: #71717a; }
footer { margin-top: 24px; color: #71717a; font-size: 12px; text-align: center; }
"#;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Seconds between browser reloads; 0 disables the meta refresh
    pub page_refresh_secs: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_refresh_secs: 30,
        }
    }
}

pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Token counts as rounded thousands, e.g. 60000 -> "60k"
pub fn format_thousands(count: f64) -> String {
    format!("{}k", (count / 1000.0).round())
}

/// KiB to one decimal with ties rounded up, e.g. 0.25 -> "0.3 KB"
pub fn format_kib(kib: f64) -> String {
    format!("{:.1} KB", (kib * 10.0).round() / 10.0)
}

/// Clock time of a backend timestamp in `tz`.
///
/// RFC 3339 timestamps are converted; naive ISO timestamps are taken as
/// already being in `tz`.
pub fn format_clock<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(tz).format(CLOCK_FORMAT).to_string();
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|ts| ts.format(CLOCK_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Render the full page for the current view state
pub fn render_page<Tz: TimeZone>(state: &DashboardState, options: &RenderOptions, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let refresh = if options.page_refresh_secs > 0 {
        format!(
            "<meta http-equiv=\"refresh\" content=\"{}\">",
            options.page_refresh_secs
        )
    } else {
        String::new()
    };

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">{}\
         <title>OpenClaw BI Dashboard</title><style>{}</style></head><body>{}</body></html>",
        refresh,
        STYLESHEET,
        render_body(state, tz)
    )
}

fn render_body<Tz: TimeZone>(state: &DashboardState, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let Some(overview) = &state.overview else {
        return "<div class=\"loading\">Loading...</div>".to_string();
    };

    let mut html = String::from("<div class=\"dashboard\">");
    html.push_str(&render_header(overview));

    html.push_str("<div class=\"grid\">");
    html.push_str(&render_session_card(state.sessions.as_ref()));
    html.push_str(&render_token_card(state.tokens.as_ref()));
    html.push_str(&render_tasks_card(state.tasks.as_ref()));
    html.push_str(&render_automation_card(state.automation.as_ref()));
    html.push_str(&render_memory_card(state.memory.as_ref()));
    html.push_str("</div>");

    html.push_str(&format!(
        "<footer>Last updated: {}</footer>",
        html_escape(&format_clock(&overview.last_updated, tz))
    ));
    html.push_str("</div>");
    html
}

fn render_header(overview: &Overview) -> String {
    format!(
        "<header><h1>{}</h1><div class=\"status-badge\">{}</div></header>",
        TITLE,
        html_escape(&overview.status)
    )
}

fn card(class: &str, title: &str, content: String) -> String {
    format!(
        "<div class=\"{}\"><h2>{}</h2>{}</div>",
        class, title, content
    )
}

fn render_session_card(sessions: Option<&Sessions>) -> String {
    let content = sessions
        .map(|s| {
            let session = &s.active_session;
            let metric = |label: &str, value: &str| {
                format!(
                    "<div class=\"metric\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>",
                    label,
                    html_escape(value)
                )
            };
            format!(
                "<div class=\"metrics\">{}{}{}</div>",
                metric("Model", session.model_name()),
                metric("Tokens In", &format_thousands(session.tokens_in)),
                metric("Tokens Out", &format_thousands(session.tokens_out))
            )
        })
        .unwrap_or_default();

    card("card", "📊 Current Session", content)
}

fn render_token_card(tokens: Option<&TokenMetrics>) -> String {
    let content = tokens
        .map(|t| render_line_chart(&ChartData::token_usage(t)))
        .unwrap_or_default();

    card("card wide", "📈 Token Usage (Last 7 Days)", content)
}

fn render_tasks_card(tasks: Option<&TaskList>) -> String {
    let content = tasks
        .map(|t| {
            let mut list = String::from("<div class=\"task-list\">");
            for task in &t.active_projects {
                list.push_str("<div class=\"task-item\"><div class=\"task-header\">");
                list.push_str(&format!(
                    "<span class=\"task-id\">{}</span><span class=\"task-status status-{}\">{}</span></div>",
                    html_escape(&task.display_id()),
                    html_escape(&task.status_slug()),
                    html_escape(&task.status)
                ));
                list.push_str(&format!(
                    "<div class=\"task-title\">{}</div>",
                    html_escape(&task.title)
                ));
                if let Some(deadline) = &task.deadline {
                    list.push_str(&format!(
                        "<div class=\"task-meta\">⏰ {}</div>",
                        html_escape(deadline)
                    ));
                }
                if let Some(progress) = task.progress {
                    list.push_str(&format!(
                        "<div class=\"progress-bar\"><div class=\"progress-fill\" style=\"width: {}%\"></div></div>",
                        progress
                    ));
                }
                list.push_str("</div>");
            }
            list.push_str("</div>");
            list
        })
        .unwrap_or_default();

    card("card wide", "🎯 Active Projects", content)
}

fn render_automation_card(automation: Option<&Automation>) -> String {
    let content = automation
        .map(|a| {
            let rows: String = a
                .cron_jobs
                .iter()
                .map(|job| {
                    format!(
                        "<div class=\"cron-item\"><div class=\"cron-name\">{}</div>\
                         <div class=\"cron-schedule\">{}</div>\
                         <div class=\"cron-status {}\">●</div></div>",
                        html_escape(&job.name),
                        html_escape(&job.schedule),
                        html_escape(&job.status)
                    )
                })
                .collect();
            format!("<div class=\"cron-list\">{}</div>", rows)
        })
        .unwrap_or_default();

    card("card", "⚙️ Automation", content)
}

fn render_memory_card(memory: Option<&MemorySummary>) -> String {
    let content = memory
        .map(|m| {
            let rows: String = m
                .recent_files
                .iter()
                .map(|file| {
                    format!(
                        "<div class=\"memory-item\"><div class=\"memory-name\">{}</div>\
                         <div class=\"memory-size\">{}</div></div>",
                        html_escape(&file.name),
                        format_kib(file.size_kib())
                    )
                })
                .collect();
            format!("<div class=\"memory-list\">{}</div>", rows)
        })
        .unwrap_or_default();

    card("card", "🧠 Recent Memory", content)
}
