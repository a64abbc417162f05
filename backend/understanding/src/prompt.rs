use hairscope_core::{ScoreBand, MAX_HEALTH_SCORE, MIN_HEALTH_SCORE};

/// Compose the system instruction from a preamble and the scoring bands.
pub fn render_system_prompt(preamble: &str, bands: &[ScoreBand]) -> String {
    let mut prompt = String::from(preamble.trim_end());
    prompt.push_str("\nImportant scoring guidelines:");
    prompt.push_str(&format!(
        "\n- Health score must be an integer from {MIN_HEALTH_SCORE} to {MAX_HEALTH_SCORE}"
    ));
    if !bands.is_empty() {
        prompt.push_str("\n- Score meanings:");
        for band in bands {
            prompt.push_str("\n  ");
            prompt.push_str(&band_line(band));
        }
    }
    prompt
}

fn band_line(band: &ScoreBand) -> String {
    if band.min == band.max {
        format!("{}: {} condition", band.min, band.label)
    } else {
        format!("{}-{}: {} condition", band.min, band.max, band.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hairscope_core::{default_score_bands, DEFAULT_SYSTEM_PREAMBLE};

    #[test]
    fn default_prompt_lists_four_bands() {
        let prompt = render_system_prompt(DEFAULT_SYSTEM_PREAMBLE, &default_score_bands());
        assert!(prompt.starts_with("You are a professional hair analysis system."));
        assert!(prompt.contains("- Health score must be an integer from 1 to 10"));
        assert!(prompt.contains("  1-3: Poor condition\n  4-6: Average condition"));
        assert!(prompt.ends_with("  9-10: Excellent condition"));
    }

    #[test]
    fn single_score_band_has_no_range() {
        let prompt = render_system_prompt("Judge.", &[ScoreBand::new(10, 10, "Perfect")]);
        assert!(prompt.ends_with("  10: Perfect condition"));
    }

    #[test]
    fn no_bands_omits_meanings() {
        let prompt = render_system_prompt("Judge.", &[]);
        assert!(!prompt.contains("Score meanings"));
    }
}
