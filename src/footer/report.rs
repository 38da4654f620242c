//! Footer validation report: Markdown summary, JSON data and console output.

use colored::*;
use std::path::{Path, PathBuf};

use super::{FooterAnalysis, FooterResults};

/// Missing-element lists show at most this many paths.
pub const MISSING_LIST_LIMIT: usize = 10;

/// Aggregate marker counts over the readable files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FooterSummary {
    pub total_files: usize,
    pub readable_files: usize,
    pub with_brand_link: usize,
    pub with_ngo_mention: usize,
    pub with_enterprise_mention: usize,
    pub with_footer_section: usize,
}

impl FooterSummary {
    pub fn from_results(results: &FooterResults) -> Self {
        let analyses: Vec<&FooterAnalysis> =
            results.values().filter_map(|r| r.analysis()).collect();
        let count = |f: fn(&FooterAnalysis) -> bool| analyses.iter().filter(|a| f(a)).count();

        Self {
            total_files: results.len(),
            readable_files: analyses.len(),
            with_brand_link: count(|a| a.has_tiation_link),
            with_ngo_mention: count(|a| a.has_ngo_mention),
            with_enterprise_mention: count(|a| a.has_enterprise_mention),
            with_footer_section: count(|a| a.has_footer_section),
        }
    }

    /// Share of readable files, in percent; zero when nothing was readable.
    pub fn percent(&self, count: usize) -> f64 {
        count as f64 * 100.0 / self.readable_files.max(1) as f64
    }
}

/// A top-level README: at most one `/` in its relative path.
pub fn is_priority(relative_path: &str) -> bool {
    relative_path.matches('/').count() <= 1
}

fn check(flag: bool) -> &'static str {
    if flag {
        "✅"
    } else {
        "❌"
    }
}

fn marker(flag: bool, icon: &'static str) -> &'static str {
    if flag {
        icon
    } else {
        "⚪"
    }
}

fn push_missing(lines: &mut Vec<String>, heading: &str, paths: &[&String]) {
    if paths.is_empty() {
        return;
    }
    lines.push(format!("### {}:", heading));
    for path in paths.iter().take(MISSING_LIST_LIMIT) {
        lines.push(format!("- {}", path));
    }
    if paths.len() > MISSING_LIST_LIMIT {
        lines.push(format!("- ... and {} more", paths.len() - MISSING_LIST_LIMIT));
    }
    lines.push(String::new());
}

/// Render the Markdown report.
pub fn render_report(results: &FooterResults, brand_link: &str) -> String {
    let summary = FooterSummary::from_results(results);
    let stat = |label: &str, count: usize| {
        format!("- **{}**: {} ({:.1}%)", label, count, summary.percent(count))
    };

    let mut lines = vec![
        "# Footer Validation Report".to_string(),
        String::new(),
        "## Summary Statistics".to_string(),
        format!("- **Total README files analyzed**: {}", summary.total_files),
        stat(&format!("Files with {} link", brand_link), summary.with_brand_link),
        stat("Files with NGO mention", summary.with_ngo_mention),
        stat("Files with enterprise mention", summary.with_enterprise_mention),
        stat("Files with footer section", summary.with_footer_section),
    ];
    if summary.readable_files < summary.total_files {
        lines.push(format!(
            "- **Unreadable files**: {}",
            summary.total_files - summary.readable_files
        ));
    }
    lines.push(String::new());

    lines.push("## Files Missing Key Elements".to_string());
    lines.push(String::new());

    let missing = |f: fn(&FooterAnalysis) -> bool| {
        results
            .iter()
            .filter(|(_, r)| r.analysis().map(|a| !f(a)).unwrap_or(false))
            .map(|(path, _)| path)
            .collect::<Vec<&String>>()
    };
    push_missing(
        &mut lines,
        &format!("Missing {} Link", brand_link),
        &missing(|a| a.has_tiation_link),
    );
    push_missing(&mut lines, "Missing NGO Mention", &missing(|a| a.has_ngo_mention));

    let priority: Vec<_> = results.iter().filter(|(path, _)| is_priority(path)).collect();
    if !priority.is_empty() {
        lines.push("## Priority Files Analysis (Main Project READMEs)".to_string());
        lines.push(String::new());

        for (path, result) in priority {
            let a = match result.analysis() {
                Some(a) => a,
                None => {
                    lines.push(format!(
                        "### ❌ {} - ERROR: {}",
                        path,
                        result.error().unwrap_or_default()
                    ));
                    continue;
                }
            };

            lines.push(format!(
                "### {} {} {} {} {}",
                check(a.has_tiation_link),
                marker(a.has_enterprise_mention, "🏢"),
                marker(a.has_ngo_mention, "🌟"),
                marker(a.has_footer_section, "📄"),
                path
            ));
            lines.push(format!("- Tiation Link: {}", check(a.has_tiation_link)));
            lines.push(format!("- Enterprise Grade: {}", check(a.has_enterprise_mention)));
            lines.push(format!("- NGO Mission: {}", check(a.has_ngo_mention)));
            lines.push(format!("- Footer Section: {}", check(a.has_footer_section)));
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Write the Markdown report and the per-file JSON data.
pub fn write_outputs(
    results: &FooterResults,
    report: &str,
    report_path: &Path,
    data_path: &Path,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    for path in [report_path, data_path] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("creating {}: {}", parent.display(), e))?;
        }
    }

    std::fs::write(report_path, report)
        .map_err(|e| anyhow::anyhow!("writing {}: {}", report_path.display(), e))?;

    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(data_path, json)
        .map_err(|e| anyhow::anyhow!("writing {}: {}", data_path.display(), e))?;

    Ok((report_path.to_path_buf(), data_path.to_path_buf()))
}

/// Print the short console summary.
pub fn write_pretty(
    summary: &FooterSummary,
    brand_link: &str,
    report_path: &Path,
    data_path: &Path,
) {
    println!("{} Validation complete!", "✅".green());
    println!("📄 Report saved to: {}", report_path.display());
    println!("📊 Data saved to: {}", data_path.display());
    println!();
    println!("{}", "📈 Quick Summary:".bold());
    println!("   - Total files: {}", summary.total_files);
    println!("   - Files with {}: {}", brand_link, summary.with_brand_link);
    let pct = summary.percent(summary.with_brand_link);
    let text = format!("{:.1}%", pct);
    let colored_pct = if pct >= 80.0 {
        text.green()
    } else if pct >= 50.0 {
        text.yellow()
    } else {
        text.red()
    };
    println!("   - Coverage: {}", colored_pct);
}
