// Assembles the Plotly-compatible figure document. The actual pixel
// rendering is left to whatever consumes the JSON.

use serde_json::json;
use serde_json::Value as JSValue;

use likert_report::{QuestionStats, SurveyReport, Trend, CANONICAL_BUCKET_LABELS};

/// Fill colors of the 5 stacked segments, from strongly-disagree (red)
/// to strongly-agree (green).
pub const SEGMENT_COLORS: [&str; 5] = ["#d9534f", "#f0ad4e", "#f5f5f5", "#5cb85c", "#2ca02c"];

const CHART_FONT: &str = "Arial";

/// Color of the average annotation when the comparison is shown.
const CHANGE_ANNOTATION_COLOR: &str = "#4a4a4a";

pub fn chart_title(comparison_active: bool) -> String {
    if comparison_active {
        "Verteilung der Likert-Skala Antworten mit Vergleich zum Vorjahr".to_string()
    } else {
        "Verteilung der Likert-Skala Antworten".to_string()
    }
}

pub fn sort_note(comparison_active: bool) -> String {
    if comparison_active {
        "Fragen sortiert nach Veränderung zum Vorjahr. ▲ zeigt Verbesserung, ▼ zeigt Verschlechterung."
            .to_string()
    } else {
        "Fragen sortiert nach Durchschnittswert.".to_string()
    }
}

/// The directional part of the annotation, e.g. "▲ +0.62".
pub fn change_label(delta: f64) -> String {
    let symbol = Trend::from_delta(delta).symbol();
    let sign = if delta > 0.0 { "+" } else { "" };
    format!("{} {}{:.2}", symbol, sign, delta)
}

/// The right-edge annotation of one question, e.g. "Ø: 4.04 (▲ +0.62)".
pub fn average_label(stats: &QuestionStats) -> String {
    match stats.delta {
        Some(delta) => format!("Ø: {:.2} ({})", stats.average, change_label(delta)),
        None => format!("Ø: {:.2}", stats.average),
    }
}

pub fn build_figure(report: &SurveyReport) -> JSValue {
    json!({
        "data": build_traces(report),
        "layout": build_layout(report),
    })
}

// One trace per question and bucket, so each segment keeps its own
// count and hover text. The legend is fed from the first question only
// and grouped per bucket label.
fn build_traces(report: &SurveyReport) -> Vec<JSValue> {
    let mut traces: Vec<JSValue> = Vec::new();
    for (q_idx, q) in report.questions.iter().enumerate() {
        for (b_idx, label) in CANONICAL_BUCKET_LABELS.iter().enumerate() {
            let value = q.percentages[b_idx];
            let count = q.counts[b_idx];
            traces.push(json!({
                "type": "bar",
                "x": [value],
                "y": [q.question],
                "orientation": "h",
                "name": label,
                "text": count.to_string(),
                "textposition": "inside",
                "insidetextanchor": "middle",
                "marker": { "color": SEGMENT_COLORS[b_idx] },
                "showlegend": q_idx == 0,
                "legendgroup": label,
                "hoverinfo": "text",
                "hovertext": format!("{}: {} ({:.1}%)", label, count, value),
            }));
        }
    }
    traces
}

fn build_layout(report: &SurveyReport) -> JSValue {
    let annotations: Vec<JSValue> = report
        .questions
        .iter()
        .map(|q| {
            let color = if q.delta.is_some() {
                CHANGE_ANNOTATION_COLOR
            } else {
                "black"
            };
            json!({
                "x": 100,
                "y": q.question,
                "text": average_label(q),
                "showarrow": false,
                "xanchor": "left",
                "font": { "size": 12, "color": color, "family": CHART_FONT, "weight": "bold" },
                "align": "left",
            })
        })
        .collect();

    // The height grows with the question count, with a floor for very
    // small surveys. The right margin leaves room for the annotations.
    let height = std::cmp::max(500, 50 * report.questions.len() + 150);
    let right_margin = if report.comparison_active { 190 } else { 130 };

    json!({
        "title": chart_title(report.comparison_active),
        "font": { "family": CHART_FONT, "size": 12 },
        "barmode": "stack",
        "xaxis": {
            "range": [0, 100],
            "tickvals": [0, 25, 50, 75, 100],
            "ticktext": ["0%", "25%", "50%", "75%", "100%"],
        },
        "yaxis": { "title": "Fragen", "autorange": "reversed" },
        "legend": {
            "orientation": "h",
            "yanchor": "bottom",
            "y": -0.25,
            "xanchor": "center",
            "x": 0.5,
        },
        "height": height,
        "margin": { "l": 20, "r": right_margin, "t": 70, "b": 100 },
        "plot_bgcolor": "white",
        "hoverlabel": { "bgcolor": "white", "font_size": 12, "font_family": CHART_FONT },
        "annotations": annotations,
    })
}
