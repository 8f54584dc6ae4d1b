use icurisk::{RiskAssessment, RiskTier};
use icurisk::features::{Feature, FeatureGroup};
use icurisk::model::{ModelFamily, SurvivalModel};
use itertools::Itertools;
use std::fmt::Write;

const GAUGE_WIDTH: usize = 50;

const HIGH_RISK_NOTE: &str = "Note: high-risk patients need closer monitoring and scheduled follow-up.\n\
     Keep a printed copy of this report with the patient record.";

/// Text rendering of a risk assessment: headline, gauge, thresholds and the
/// numbered action bundle.
pub fn render_assessment(assessment: &RiskAssessment) -> String {
    let mut out = String::new();
    let filled_percent = assessment.percent.trunc().clamp(0.0, 100.0) as usize;
    let filled = filled_percent * GAUGE_WIDTH / 100;

    writeln!(
        out,
        "1-year mortality risk: {:.1}% ({})",
        assessment.percent, assessment.tier
    )
    .ok();
    writeln!(
        out,
        "[{}{}] {filled_percent}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled)
    )
    .ok();
    writeln!(
        out,
        "Tiers: Low < {:.1}% <= Medium < {:.1}% <= High",
        assessment.thresholds.low_cut(),
        assessment.thresholds.high_cut()
    )
    .ok();
    writeln!(out).ok();
    writeln!(out, "Recommended actions:").ok();
    for (i, action) in assessment.recommendations.iter().enumerate() {
        writeln!(out, "  {}. {action}", i + 1).ok();
    }
    if assessment.tier == RiskTier::High {
        writeln!(out).ok();
        writeln!(out, "{HIGH_RISK_NOTE}").ok();
    }
    out
}

/// The input contract: every field, grouped as on the intake form, with its
/// accepted codes.
pub fn render_schema() -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Patient files are TOML with one table per group. Every field is required."
    )
    .ok();
    writeln!(out, "Flags accept 0/1 or false/true.").ok();
    for group in FeatureGroup::ALL {
        writeln!(out).ok();
        writeln!(out, "[{}]  {}", group.table(), group.title()).ok();
        for feature in Feature::ALL.iter().filter(|f| f.group() == group) {
            let codes = feature
                .codes()
                .iter()
                .map(|(code, meaning)| format!("{code}: {meaning}"))
                .join(", ");
            writeln!(
                out,
                "  {:<28} {} ({codes})",
                feature.as_str(),
                feature.description()
            )
            .ok();
        }
    }
    out
}

pub fn render_inspection(model: &SurvivalModel) -> String {
    let mut out = String::new();
    let artifact = model.artifact();
    writeln!(out, "Family: {}", artifact.family.name()).ok();
    writeln!(out, "Validated horizon: {} days", artifact.horizon_days).ok();
    match &artifact.family {
        ModelFamily::ProportionalHazards { baseline, .. } => {
            writeln!(out, "Baseline hazard steps: {}", baseline.len()).ok();
        }
        ModelFamily::SurvivalForest { trees } => {
            let leaves: usize = trees.iter().map(|tree| tree.leaf_count()).sum();
            writeln!(out, "Trees: {} ({leaves} leaves)", trees.len()).ok();
        }
    }
    writeln!(out, "Feature order:").ok();
    for (i, feature) in model.canonical_order().features().iter().enumerate() {
        writeln!(out, "  {:>2}. {feature}", i + 1).ok();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use icurisk::ThresholdPolicy;

    fn assessment(percent: f64, tier: RiskTier) -> RiskAssessment {
        RiskAssessment {
            probability: percent / 100.0,
            percent,
            tier,
            recommendations: tier.recommendations(),
            horizon_days: 365.0,
            thresholds: ThresholdPolicy::Strict.thresholds(),
        }
    }

    #[test]
    fn gauge_is_filled_to_truncated_percent() {
        let text = render_assessment(&assessment(86.47, RiskTier::High));
        assert!(text.starts_with("1-year mortality risk: 86.5% (High risk)"), "{text}");
        let gauge = format!("[{}{}] 86%", "#".repeat(43), "-".repeat(7));
        assert!(text.contains(&gauge), "{text}");
        assert!(text.contains("  4. Consider transfer to ICU-level monitoring"));
        assert!(text.trim_end().ends_with(HIGH_RISK_NOTE), "{text}");
    }

    #[test]
    fn zero_risk_renders_empty_gauge() {
        let text = render_assessment(&assessment(0.0, RiskTier::Low));
        assert!(text.contains(&format!("[{}] 0%", "-".repeat(GAUGE_WIDTH))));
        assert!(text.contains("Low < 30.0% <= Medium < 60.0% <= High"));
        assert!(!text.contains("closer monitoring"), "{text}");
    }

    #[test]
    fn schema_lists_every_feature() {
        let text = render_schema();
        for feature in Feature::ALL {
            assert!(text.contains(feature.as_str()), "{feature} missing");
        }
        assert!(text.contains("3: >=91"));
    }
}
