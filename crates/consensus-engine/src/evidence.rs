use analysis_core::OpinionSet;
use std::collections::HashSet;

/// Cap on unified factors, key risks and key opportunities
pub const MAX_EVIDENCE_ITEMS: usize = 5;

/// Primary factors cited by at least two distinct perspectives, grouped and
/// reported by their lowercased text, in first-seen order.
pub fn unified_factors(opinions: &OpinionSet) -> Vec<String> {
    // (folded factor, citing perspectives)
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();

    for opinion in opinions {
        for factor in &opinion.primary_factors {
            let key = factor.to_lowercase();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, cited_by)) => {
                    if !cited_by.contains(&opinion.perspective.as_str()) {
                        cited_by.push(&opinion.perspective);
                    }
                }
                None => groups.push((key, vec![&opinion.perspective])),
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, cited_by)| cited_by.len() >= 2)
        .map(|(factor, _)| factor)
        .take(MAX_EVIDENCE_ITEMS)
        .collect()
}

/// Concatenate, drop case-insensitive repeats (first occurrence wins), cap.
pub fn dedup_ranked<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .take(MAX_EVIDENCE_ITEMS)
        .cloned()
        .collect()
}

pub fn key_risks(opinions: &OpinionSet) -> Vec<String> {
    dedup_ranked(opinions.iter().flat_map(|o| o.risk_factors.iter()))
}

pub fn key_opportunities(opinions: &OpinionSet) -> Vec<String> {
    dedup_ranked(opinions.iter().flat_map(|o| o.opportunities.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{opinion, set};
    use analysis_core::{ImpactLevel, Opinion, TimeHorizon};

    fn with(perspective: &str, factors: &[&str], risks: &[&str], opportunities: &[&str]) -> Opinion {
        let mut o = opinion(perspective, 0.2, ImpactLevel::Moderate, TimeHorizon::ShortTerm);
        o.primary_factors = factors.iter().map(|s| s.to_string()).collect();
        o.risk_factors = risks.iter().map(|s| s.to_string()).collect();
        o.opportunities = opportunities.iter().map(|s| s.to_string()).collect();
        o
    }

    #[test]
    fn test_unified_factors_need_two_perspectives() {
        let opinions = set(vec![
            with("a", &["Record deliveries", "Margin pressure", "CEO warning"], &[], &[]),
            with("b", &["margin pressure", "Supply chain"], &[], &[]),
            with("c", &["Supply Chain", "CEO WARNING"], &[], &[]),
        ]);
        assert_eq!(
            unified_factors(&opinions),
            vec!["margin pressure", "ceo warning", "supply chain"]
        );
    }

    #[test]
    fn test_repeat_within_one_perspective_is_not_agreement() {
        let opinions = set(vec![
            with("a", &["Buyback", "buyback"], &[], &[]),
            with("b", &["Dividend"], &[], &[]),
        ]);
        assert!(unified_factors(&opinions).is_empty());
    }

    #[test]
    fn test_unified_factors_capped() {
        let shared: Vec<String> = (0..8).map(|i| format!("factor {}", i)).collect();
        let shared: Vec<&str> = shared.iter().map(String::as_str).collect();
        let opinions = set(vec![with("a", &shared, &[], &[]), with("b", &shared, &[], &[])]);
        let unified = unified_factors(&opinions);
        assert_eq!(unified.len(), MAX_EVIDENCE_ITEMS);
        assert_eq!(unified[0], "factor 0");
    }

    #[test]
    fn test_risks_deduplicated_in_perspective_order() {
        let opinions = set(vec![
            with("a", &[], &["Regulatory ban", "Execution risk"], &["Upside if risks resolve"]),
            with("b", &[], &["regulatory BAN", "Currency swings"], &["upside if risks resolve"]),
            with("c", &[], &["Valuation", "Competition", "Liquidity"], &[]),
        ]);

        assert_eq!(
            key_risks(&opinions),
            vec!["Regulatory ban", "Execution risk", "Currency swings", "Valuation", "Competition"]
        );
        assert_eq!(key_opportunities(&opinions), vec!["Upside if risks resolve"]);
    }

    #[test]
    fn test_factors_reported_lowercased_and_untrimmed() {
        let opinions = set(vec![
            with("a", &["Record Earnings", " Guidance"], &["", "  "], &[]),
            with("b", &["record earnings", "guidance"], &[], &[]),
        ]);
        assert_eq!(unified_factors(&opinions), vec!["record earnings"]);
        assert_eq!(key_risks(&opinions), vec!["", "  "]);
    }
}
