//! Three-segment compatibility bar with the assistant's reasoning.

use crate::document::AiAnalysis;
use crate::render::node::{el, Node};

const SEGMENTS: &[(&str, &str)] = &[
    ("Qualified", "bg-green-500"),
    ("Not qualified", "bg-red-500"),
    ("Overqualified", "bg-yellow-400"),
];

/// Segment labels are only drawn when a segment is wider than 10%.
const LABEL_THRESHOLD: f64 = 10.0;

fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

pub fn render_compatibility(analysis: &AiAnalysis) -> Node {
    let q = &analysis.qualification;
    let values = [
        q.qualified_percentage,
        q.not_qualified_percentage,
        q.overqualified_percentage,
    ];
    let arguments = [
        &q.qualified_argument,
        &q.not_qualified_argument,
        &q.overqualified_argument,
    ];

    let bar = el("div")
        .class("compatibility-bar flex w-full h-6 rounded-full overflow-hidden text-xs font-bold text-white")
        .children(SEGMENTS.iter().zip(values).map(|((label, color), pct)| -> Node {
            let pct_text = format_percent(pct);
            let segment = el("div")
                .class(format!("segment {color} flex items-center justify-center"))
                .attr("title", format!("{label}: {pct_text}%"))
                .style("width", format!("{pct_text}%"));
            if pct > LABEL_THRESHOLD {
                segment.text(format!("{pct_text}%")).into()
            } else {
                segment.into()
            }
        }));

    let reasons = SEGMENTS
        .iter()
        .zip(arguments)
        .map(|((label, _), argument)| -> Node {
            el("p")
                .class("text-sm mb-1")
                .child(el("strong").text(format!("{label}: ")))
                .text(argument.clone())
                .into()
        });

    let questions = [
        ("Position and fit", &analysis.question1),
        ("Proof of results", &analysis.question2),
        ("Most relevant strengths", &analysis.question3),
        ("Future potential", &analysis.question4),
    ]
    .into_iter()
    .map(|(heading, answer)| -> Node {
        el("div")
            .class("mb-2")
            .child(el("h4").class("font-semibold").text(heading))
            .child(el("p").class("text-sm").text(answer.clone()))
            .into()
    });

    el("section")
        .class("compatibility p-4")
        .child(el("h3").class("text-lg font-bold mb-2").text("Job Compatibility"))
        .child(bar)
        .child(el("p").class("text-sm mt-2 mb-2").text(q.summary.clone()))
        .children(reasons)
        .children(questions)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::QualificationAnalysis;

    fn analysis(qualified: f64, not_qualified: f64, over: f64) -> AiAnalysis {
        AiAnalysis {
            question1: "Senior backend role".to_string(),
            qualification: QualificationAnalysis {
                qualified_percentage: qualified,
                not_qualified_percentage: not_qualified,
                overqualified_percentage: over,
                summary: "Partial match".to_string(),
                ..QualificationAnalysis::default()
            },
            ..AiAnalysis::default()
        }
    }

    fn segments(node: &Node) -> Vec<String> {
        let mut found = Vec::new();
        node.find_by_class("segment", &mut found);
        found
            .into_iter()
            .map(|e| Node::from(e.clone()).to_text())
            .collect()
    }

    #[test]
    fn test_labels_only_above_ten_percent() {
        let node = render_compatibility(&analysis(8.0, 82.0, 10.0));
        assert_eq!(segments(&node), ["", "82%", ""]);
        let html = node.to_html();
        assert!(html.contains("width: 8%"));
        assert!(html.contains("width: 82%"));
        assert!(html.contains("width: 10%"));
    }

    #[test]
    fn test_percentages_are_not_renormalized() {
        let html = render_compatibility(&analysis(50.0, 30.0, 30.0)).to_html();
        assert!(html.contains("width: 50%"));
        assert_eq!(html.matches("width: 30%").count(), 2);
    }

    #[test]
    fn test_fractional_percentages_keep_precision() {
        let html = render_compatibility(&analysis(33.5, 33.5, 33.0)).to_html();
        assert!(html.contains("width: 33.5%"));
    }

    #[test]
    fn test_includes_strategic_answers() {
        let text = render_compatibility(&analysis(70.0, 20.0, 10.0)).to_text();
        assert!(text.contains("Senior backend role"));
        assert!(text.contains("Partial match"));
    }
}
