// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the apidex CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `APIDEX_THEME` first, then `COLORFGBG`, then defaults to dark. Colors are
//! dropped entirely when stdout is not a TTY or `NO_COLOR` is set, so piped
//! output stays plain.

use std::sync::OnceLock;

use apidex::{EndpointRecord, HttpMethod, IndexStats};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

/// Longest description shown under a search result.
const DESCRIPTION_WIDTH: usize = 100;

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

type Rgb = (u8, u8, u8);

/// What a piece of output means, independent of the terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Get,
    Post,
    /// PUT and PATCH
    Write,
    /// DELETE, and the deprecation marker
    Delete,
    /// HEAD, OPTIONS, TRACE
    OtherMethod,
    /// Section labels and tags
    Accent,
    /// Borders, descriptions, low scores
    Muted,
    Strong,
    Title,
}

pub struct Palette {
    get: Rgb,
    post: Rgb,
    write: Rgb,
    delete: Rgb,
    other_method: Rgb,
    accent: Rgb,
    muted: Rgb,
    strong: Rgb,
    title: Rgb,
}

impl Palette {
    /// OneDark
    pub const DARK: Palette = Palette {
        get: (152, 195, 121),
        post: (97, 175, 239),
        write: (229, 192, 123),
        delete: (224, 108, 117),
        other_method: (198, 120, 221),
        accent: (86, 182, 194),
        muted: (92, 99, 112),
        strong: (166, 226, 46),
        title: (102, 217, 239),
    };

    /// One Light
    pub const LIGHT: Palette = Palette {
        get: (80, 161, 79),
        post: (64, 120, 242),
        write: (193, 132, 1),
        delete: (228, 86, 73),
        other_method: (166, 38, 164),
        accent: (1, 132, 188),
        muted: (160, 161, 167),
        strong: (68, 140, 39),
        title: (1, 112, 158),
    };

    fn color(&self, role: Role) -> Rgb {
        match role {
            Role::Get => self.get,
            Role::Post => self.post,
            Role::Write => self.write,
            Role::Delete => self.delete,
            Role::OtherMethod => self.other_method,
            Role::Accent => self.accent,
            Role::Muted => self.muted,
            Role::Strong => self.strong,
            Role::Title => self.title,
        }
    }
}

/// Picks a palette from `APIDEX_THEME` ("light"/"dark"), falling back to the
/// background half of `COLORFGBG` ("fg;bg", where 7 and 9..=15 are light).
fn palette_for(theme: Option<&str>, colorfgbg: Option<&str>) -> &'static Palette {
    match theme.map(str::to_ascii_lowercase).as_deref() {
        Some("light" | "l") => return &Palette::LIGHT,
        Some("dark" | "d") => return &Palette::DARK,
        _ => {}
    }
    let background = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok());
    match background {
        Some(7 | 9..=15) => &Palette::LIGHT,
        _ => &Palette::DARK,
    }
}

fn palette() -> &'static Palette {
    static PALETTE: OnceLock<&'static Palette> = OnceLock::new();
    PALETTE.get_or_init(|| {
        palette_for(
            std::env::var("APIDEX_THEME").ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    })
}

fn fg((r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Wrap `text` in the color for `role`, plus any modifiers.
pub fn paint(role: Role, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), fg(palette().color(role)), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut `text` to `max` characters, ending in "..." when shortened.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = if use_colors() { fg(palette().color(Role::Muted)) } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    println!(
        "{}│{}{}{}│{}",
        border,
        reset,
        pad_right(content, BOX_WIDTH),
        border,
        reset
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", paint(Role::Accent, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("┌{}{}┐", label_part, "─".repeat(remaining));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("└{}┘", "─".repeat(BOX_WIDTH));
}

/// Print double-line banner with a centered title
pub fn banner(text: &str) {
    let colored = paint(Role::Title, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;
    println!("╔{}╗", "═".repeat(BOX_WIDTH));
    println!(
        "║{}{}{}║",
        " ".repeat(left_pad),
        colored,
        " ".repeat(total_pad - left_pad)
    );
    println!("╚{}╝", "═".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded method name, padded to 7 columns
pub fn method_label(method: HttpMethod) -> String {
    let name = format!("{:<7}", method.as_str());
    let role = match method {
        HttpMethod::Get => Role::Get,
        HttpMethod::Post => Role::Post,
        HttpMethod::Put | HttpMethod::Patch => Role::Write,
        HttpMethod::Delete => Role::Delete,
        HttpMethod::Head | HttpMethod::Options | HttpMethod::Trace => Role::OtherMethod,
    };
    paint(role, &[BOLD], &name)
}

/// Color-coded score value
pub fn score_value(score: u32) -> String {
    let text = format!("score {}", score);
    if score >= 6 {
        paint(Role::Strong, &[], &text)
    } else if score >= 3 {
        paint(Role::Get, &[], &text)
    } else {
        paint(Role::Muted, &[], &text)
    }
}

/// `GET     /v1/services` plus an optional deprecation marker
pub fn endpoint_line(record: &EndpointRecord) -> String {
    let marker = if record.deprecated {
        format!(" {}", paint(Role::Delete, &[BOLD], "[DEPRECATED]"))
    } else {
        String::new()
    };
    format!("{} {}{}", method_label(record.method), record.path, marker)
}

/// Multi-line rendering of one search result.
pub fn endpoint_detail(record: &EndpointRecord, score: Option<u32>) -> String {
    let indent = " ".repeat(8);
    let mut lines = Vec::new();

    let head = endpoint_line(record);
    lines.push(match score {
        Some(s) => format!("{}  {}", head, score_value(s)),
        None => head,
    });

    if !record.summary.is_empty() {
        lines.push(format!("{}Summary: {}", indent, record.summary));
    }
    if !record.description.is_empty() && record.description != record.summary {
        let description = truncate_text(&record.description, DESCRIPTION_WIDTH);
        lines.push(format!("{}Description: {}", indent, paint(Role::Muted, &[], &description)));
    }
    if !record.tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent, paint(Role::Accent, &[], &record.tags.join(", "))));
    }

    let mut meta = Vec::new();
    if record.requires_auth {
        meta.push("Auth required".to_string());
    }
    if record.parameter_count > 0 {
        meta.push(format!("{} params", record.parameter_count));
    }
    if record.has_request_body {
        meta.push("Has request body".to_string());
    }
    if !record.operation_id.is_empty() {
        meta.push(format!("operationId: {}", record.operation_id));
    }
    if !meta.is_empty() {
        lines.push(format!("{}{}", indent, paint(Role::Muted, &[DIM], &meta.join(" | "))));
    }

    lines.join("\n")
}

/// Boxed statistics report.
pub fn print_stats(stats: &IndexStats) {
    banner(&format!("{} v{}", stats.title, stats.source_version));
    println!();

    section_top("OVERVIEW");
    row(&format!("  Total endpoints:  {:>8}", stats.total_endpoints));
    row(&format!("  Auth required:    {:>8}", stats.auth_required));
    row(&format!("  Deprecated:       {:>8}", stats.deprecated));
    row(&format!("  Untagged:         {:>8}", stats.untagged));
    row(&format!("  Built at:         {}", stats.built_at.to_rfc3339()));
    section_bot();
    println!();

    section_top("BY METHOD");
    for (method, count) in &stats.method_counts {
        row(&format!("  {} {:>8}", method_label(*method), count));
    }
    section_bot();
    println!();

    // Most populated categories first, then by name
    let mut tags: Vec<(&String, &usize)> = stats.tag_counts.iter().collect();
    tags.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    section_top("BY CATEGORY (TAG)");
    for (tag, count) in tags {
        let name = truncate_text(tag, 40);
        row(&format!("  {} {:>8}", pad_right(&paint(Role::Accent, &[], &name), 40), count));
    }
    section_bot();
}
