//! Presentation helpers: turn a validated result into what the UI draws.

use serde::Serialize;

use crate::analysis::models::{ExamAnalysisResult, ExamParameter, ParameterRange};

/// Marker shown when a recommendation has no usable leading icon.
pub const DEFAULT_ICON: &str = "💡";

/// Bullet glyphs that render poorly as icons; replaced by `DEFAULT_ICON`.
const BULLET_GLYPHS: &[char] = &['●', '■', '▲', '★', '☆', '•', '▪', '▫', '◆'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationItem {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedParameter {
    pub name: String,
    pub unit: String,
    pub current: String,
    pub laboratory: Option<String>,
    pub optimal: String,
    pub valuation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedAnalysis {
    pub date: String,
    pub parameters: Vec<PresentedParameter>,
    pub analysis: Vec<String>,
    pub nutritional_recommendations: Vec<RecommendationItem>,
    pub exercise_recommendations: Vec<RecommendationItem>,
    pub sleep_recommendations: Vec<RecommendationItem>,
    pub supplement_recommendations: Vec<RecommendationItem>,
}

pub fn present(result: &ExamAnalysisResult) -> PresentedAnalysis {
    PresentedAnalysis {
        date: result.date.clone(),
        parameters: result.parameters.iter().map(present_parameter).collect(),
        analysis: result.analysis.clone(),
        nutritional_recommendations: extract_icons(&result.nutritional_recommendations),
        exercise_recommendations: extract_icons(&result.exercise_recommendations),
        sleep_recommendations: extract_icons(&result.sleep_recommendations),
        supplement_recommendations: extract_icons(&result.supplement_recommendations),
    }
}

fn present_parameter(parameter: &ExamParameter) -> PresentedParameter {
    PresentedParameter {
        name: parameter.name.clone(),
        unit: parameter.unit.clone(),
        current: render_range(&parameter.current_range, &parameter.unit),
        laboratory: parameter
            .laboratory_range
            .as_ref()
            .map(|r| render_range(r, &parameter.unit)),
        optimal: render_range(&parameter.optimal_range, &parameter.unit),
        valuation: parameter.valuation.clone(),
    }
}

/// `"92 mg/dL"` for a single value, `"70 – 100 mg/dL"` for an interval.
pub fn render_range(range: &ParameterRange, unit: &str) -> String {
    let value = match range.max {
        Some(max) => format!("{} – {}", range.min, max),
        None => range.min.to_string(),
    };
    let unit = unit.trim();
    if unit.is_empty() {
        value
    } else {
        format!("{value} {unit}")
    }
}

fn extract_icons(recommendations: &[String]) -> Vec<RecommendationItem> {
    recommendations.iter().map(|r| extract_icon(r)).collect()
}

/// Splits the leading marker off a recommendation.
///
/// Emoji sequences are kept whole. Known bullet glyphs become `DEFAULT_ICON`.
/// Any other leading character is taken as the icon, letters included: a
/// plain `"Camina 30 min"` yields `C` / `amina 30 min`. That matches the
/// output the UI has always shown and is pending product sign-off.
pub fn extract_icon(recommendation: &str) -> RecommendationItem {
    let trimmed = recommendation.trim_start();
    let Some(first) = trimmed.chars().next() else {
        return RecommendationItem {
            icon: DEFAULT_ICON.to_string(),
            text: String::new(),
        };
    };

    let (marker, rest) = trimmed.split_at(leading_marker_len(trimmed));
    let icon = if BULLET_GLYPHS.contains(&first) {
        DEFAULT_ICON.to_string()
    } else {
        marker.to_string()
    };

    RecommendationItem {
        icon,
        text: rest.trim().to_string(),
    }
}

/// Byte length of the first visual symbol of a non-empty string.
fn leading_marker_len(s: &str) -> usize {
    let mut chars = s.char_indices().peekable();
    let Some((_, first)) = chars.next() else {
        return 0;
    };
    let mut end = first.len_utf8();

    if is_regional_indicator(first) {
        if let Some(&(i, c)) = chars.peek() {
            if is_regional_indicator(c) {
                end = i + c.len_utf8();
            }
        }
        return end;
    }

    while let Some(&(i, c)) = chars.peek() {
        if is_emoji_modifier(c) {
            end = i + c.len_utf8();
            chars.next();
        } else if c == '\u{200D}' {
            end = i + c.len_utf8();
            chars.next();
            if let Some((j, joined)) = chars.next() {
                end = j + joined.len_utf8();
            }
        } else {
            break;
        }
    }
    end
}

fn is_emoji_modifier(c: char) -> bool {
    matches!(c,
        '\u{FE0E}' | '\u{FE0F}'          // variation selectors
        | '\u{20E3}'                     // combining keycap
        | '\u{1F3FB}'..='\u{1F3FF}'      // skin tones
        | '\u{E0020}'..='\u{E007F}'      // tag sequences
    )
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}
