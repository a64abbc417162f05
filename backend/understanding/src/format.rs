//! Renders a [`HairAnalysis`] as the multi-line text shown in the UI.

use std::fmt::Write;

use hairscope_core::HairAnalysis;

const NO_ISSUES_LINE: &str = "   No major issues detected";

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("   • {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_analysis(result: &HairAnalysis) -> String {
    let issues = if result.visible_issues.is_empty() {
        NO_ISSUES_LINE.to_string()
    } else {
        bullets(&result.visible_issues)
    };

    let mut out = String::from("\nHair Analysis Results:\n\n");
    // Writing to a String cannot fail.
    let _ = writeln!(out, "1. Hair Type: {}", result.hair_type);
    let _ = writeln!(out, "2. Hair Texture: {}", result.hair_texture);
    let _ = writeln!(out, "3. Scalp Condition: {}", result.scalp_condition);
    let _ = writeln!(out, "4. Visible Issues:\n{issues}");
    let _ = writeln!(out, "5. Hair Health Score: {}/10", result.health_score);
    let _ = writeln!(out, "6. Recommendations:\n{}", bullets(&result.recommendations));
    out
}
