use crate::pipeline::stage6_views::PersonProfile;
use crate::report::{format_score, format_value};

pub const PAGE_BREAK: char = '\u{0c}';
pub const LINES_PER_PAGE: usize = 40;
const TITLE: &str = "Personnel Evaluation Summary";
const BAR_WIDTH: usize = 20;

fn profile_lines(profile: &PersonProfile) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Name: {}", profile.name));
    lines.push(format!("Department: {}", profile.department));
    if let Some(pa) = &profile.political_affiliation {
        lines.push(format!("Political affiliation: {pa}"));
    }
    if let Some(role) = &profile.role {
        lines.push(format!("Role: {role}"));
    }
    if let Some(age) = profile.age {
        lines.push(format!("Age: {}", format_value(age)));
    }
    lines.push(format!(
        "Composite score: {} ({})",
        format_score(profile.composite),
        profile.level
    ));
    for dim in &profile.dimensions {
        lines.push(format!(
            "  {:<12} {:>5}  {}  {}",
            dim.dimension,
            format_value(dim.value),
            bar(dim.fraction),
            dim.level
        ));
    }
    if let Some(remarks) = &profile.remarks {
        lines.push(format!("Remarks: {remarks}"));
    }
    lines
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Profiles laid out on fixed-height pages separated by form feeds. Each page
/// carries a title header and a `Page i / n` footer; a profile is moved to the
/// next page rather than split when it fits on one.
pub fn render_profiles_document(profiles: &[PersonProfile]) -> String {
    // header: title + rule + blank, footer: blank + page line
    let body_lines = LINES_PER_PAGE.saturating_sub(5).max(1);

    let mut pages: Vec<Vec<String>> = vec![Vec::new()];
    for profile in profiles {
        let mut block = profile_lines(profile);
        block.push(String::new());
        let current_len = pages.last().map(Vec::len).unwrap_or(0);
        if current_len > 0 && current_len + block.len() > body_lines && block.len() <= body_lines {
            pages.push(Vec::new());
        }
        for line in block {
            if pages.last().map(Vec::len).unwrap_or(0) >= body_lines {
                pages.push(Vec::new());
            }
            if let Some(page) = pages.last_mut() {
                page.push(line);
            }
        }
    }
    if profiles.is_empty() {
        if let Some(page) = pages.last_mut() {
            page.push("No personnel match the current filter.".to_string());
        }
    }

    let total = pages.len();
    let mut out = String::new();
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            out.push(PAGE_BREAK);
        }
        out.push_str(TITLE);
        out.push('\n');
        out.push_str(&"=".repeat(TITLE.len()));
        out.push_str("\n\n");
        for line in page {
            out.push_str(line);
            out.push('\n');
        }
        for _ in page.len()..body_lines {
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&format!("Page {} / {}\n", i + 1, total));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
