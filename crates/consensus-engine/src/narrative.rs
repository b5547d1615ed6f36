use analysis_core::{
    Conflict, ImpactLevel, OpinionSet, Recommendation, SentimentSignal, WeightRationale,
};

use crate::WeightSelection;

const ELLIPSIS: &str = "...";

fn words(tag: &str) -> String {
    tag.replace('_', " ")
}

/// Cut `text` to at most `max_chars` characters, ending in an ellipsis when cut.
fn fit_to_budget(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut cut: String = text.chars().take(keep).collect();
    cut.truncate(cut.trim_end().len());
    cut.push_str(ELLIPSIS);
    cut
}

/// Short decision-maker summary, never longer than `max_chars` characters.
pub fn executive_summary(
    sentiment: SentimentSignal,
    impact: ImpactLevel,
    recommendation: Recommendation,
    conflicts: &[Conflict],
    max_chars: usize,
) -> String {
    let mut summary = format!(
        "Overall {} sentiment with {} expected impact. Recommendation: {}.",
        words(sentiment.as_str()),
        words(impact.as_str()),
        recommendation.to_label()
    );

    if let Some(primary) = conflicts.first() {
        summary.push_str(&format!(
            " However, {} areas of disagreement suggest caution. Primary concern: {}.",
            conflicts.len(),
            primary.kind.words()
        ));
    }

    fit_to_budget(summary, max_chars)
}

fn weighting_explanation(rationale: WeightRationale) -> &'static str {
    match rationale {
        WeightRationale::Default => "Balanced weighting as all perspectives are relevant.",
        WeightRationale::QuantitativeMetrics => {
            "Fundamental-heavy due to strong quantitative metrics in the fundamental view."
        }
        WeightRationale::HighConflict => {
            "Market dynamics emphasized because more than two conflicts were detected."
        }
        WeightRationale::SentimentFundamentalDivergence => {
            "Market dynamics emphasized because sentiment and fundamentals strongly disagree."
        }
    }
}

/// Per-perspective view, conflict summary, then the weighting rule that fired.
pub fn detailed_rationale(
    opinions: &OpinionSet,
    conflicts: &[Conflict],
    selection: &WeightSelection,
) -> String {
    let mut parts: Vec<String> = opinions
        .iter()
        .map(|opinion| {
            let basis = opinion
                .primary_factors
                .first()
                .map(|f| f.to_lowercase())
                .unwrap_or_else(|| "multiple factors".to_string());
            format!(
                "{} (weight: {:.1}%): Sees {:+.2} sentiment based on {}.",
                opinion.perspective,
                selection.weight_of(&opinion.perspective) * 100.0,
                opinion.polarity,
                basis
            )
        })
        .collect();

    if conflicts.is_empty() {
        parts.push("\nAgents show strong alignment, suggesting clear market direction.".to_string());
    } else {
        let kinds: Vec<&str> = conflicts.iter().map(|c| c.kind.words()).collect();
        parts.push(format!(
            "\nKey disagreements: {}. This suggests market uncertainty and potential volatility.",
            kinds.join(", ")
        ));
    }

    parts.push(format!(
        "\nWeighting approach: {}",
        weighting_explanation(selection.rationale)
    ));

    parts.join(" ")
}
