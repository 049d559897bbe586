//! # Charts Module
//!
//! Builders turn scores into [`Chart`] descriptions; a [`ChartDisplay`]
//! shows them. Builders are pure and never see an empty score list: the
//! pipeline fails with `NoData` first.

mod terminal;

pub use terminal::TerminalDisplay;

use crate::models::Analysis;
use crate::sentiment::PolarityLexicon;
use serde::{Deserialize, Serialize};

const POLARITY_LABEL: &str = "Sentiment Polarity (-1 to 1)";

/// Chart type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    AverageBar,
    DistributionPie,
    Histogram,
    SequentialLine,
    LengthScatter,
    KeywordHeatmap,
}

/// One pie slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the total in percent
    pub percent: f64,
}

/// One histogram bin, `[start, end)` except the last which is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Chart payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    Bar {
        label: String,
        value: f64,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
    Histogram {
        bins: Vec<HistogramBin>,
    },
    Line {
        points: Vec<(f64, f64)>,
    },
    Scatter {
        points: Vec<(f64, f64)>,
    },
    Heatmap {
        row_labels: Vec<String>,
        /// `matrix[row][column]`, one column per text
        matrix: Vec<Vec<f64>>,
    },
}

/// A renderable chart description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub subtitle: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub data: ChartData,
}

impl Chart {
    fn new(title: &str, subtitle: &str, data: ChartData) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            x_label: None,
            y_label: None,
            data,
        }
    }

    fn with_axes(mut self, x_label: Option<&str>, y_label: Option<&str>) -> Self {
        self.x_label = x_label.map(str::to_string);
        self.y_label = y_label.map(str::to_string);
        self
    }

    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Bar { .. } => ChartKind::AverageBar,
            ChartData::Pie { .. } => ChartKind::DistributionPie,
            ChartData::Histogram { .. } => ChartKind::Histogram,
            ChartData::Line { .. } => ChartKind::SequentialLine,
            ChartData::Scatter { .. } => ChartKind::LengthScatter,
            ChartData::Heatmap { .. } => ChartKind::KeywordHeatmap,
        }
    }
}

/// Something that can show a chart
pub trait ChartDisplay {
    fn show(&mut self, chart: &Chart) -> std::io::Result<()>;
}

/// Arithmetic mean of the scores
pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// `(positive, negative, neutral)` counts; only exact zeros are neutral
pub fn sentiment_counts(scores: &[f64]) -> (usize, usize, usize) {
    scores.iter().fold((0, 0, 0), |(pos, neg, neu), &s| {
        if s > 0.0 {
            (pos + 1, neg, neu)
        } else if s < 0.0 {
            (pos, neg + 1, neu)
        } else {
            (pos, neg, neu + 1)
        }
    })
}

/// Single bar at the mean score
pub fn average_bar(scores: &[f64]) -> Chart {
    Chart::new(
        "Average Sentiment of Comments",
        "Average sentiment derived from the analyzed comments",
        ChartData::Bar {
            label: "Average Sentiment".to_string(),
            value: mean(scores),
        },
    )
    .with_axes(None, Some(POLARITY_LABEL))
}

/// Positive / negative / neutral shares
pub fn distribution_pie(scores: &[f64]) -> Chart {
    let (positive, negative, neutral) = sentiment_counts(scores);
    let total = scores.len();
    let percent = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    };

    let slices = [("Positive", positive), ("Negative", negative), ("Neutral", neutral)]
        .into_iter()
        .map(|(label, count)| PieSlice {
            label: label.to_string(),
            count,
            percent: percent(count),
        })
        .collect();

    Chart::new(
        "Distribution of Sentiments",
        "Comments classified into positive, negative, or neutral",
        ChartData::Pie { slices },
    )
}

/// Equal-width bins over the observed score range.
///
/// A constant input gets the range `value ± 0.5`.
pub fn histogram(scores: &[f64], bin_count: usize) -> Chart {
    let bin_count = bin_count.max(1);
    let mut low = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !low.is_finite() || !high.is_finite() {
        low = -1.0;
        high = 1.0;
    } else if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let width = (high - low) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            start: low + width * i as f64,
            end: if i + 1 == bin_count {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &score in scores {
        let index = (((score - low) / width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    Chart::new(
        "Distribution of Sentiment in Comments",
        "How sentiments are distributed across comments",
        ChartData::Histogram { bins },
    )
    .with_axes(Some(POLARITY_LABEL), Some("Number of Comments"))
}

/// Scores in fetch order
pub fn sequential_line(scores: &[f64]) -> Chart {
    let points = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64, s))
        .collect();

    Chart::new(
        "Variation of Sentiment in Comments",
        "Sequential sentiment changes across comments",
        ChartData::Line { points },
    )
    .with_axes(Some("Comment Index"), Some(POLARITY_LABEL))
}

/// Character length of each text against its score
pub fn length_scatter(scores: &[f64], texts: &[String]) -> Chart {
    let points = texts
        .iter()
        .zip(scores)
        .map(|(text, &s)| (text.chars().count() as f64, s))
        .collect();

    Chart::new(
        "Sentiment vs. Text Length",
        "Short comments like 'Great!' vs. long reviews",
        ChartData::Scatter { points },
    )
    .with_axes(Some("Text Length"), Some(POLARITY_LABEL))
}

/// Keyword × text matrix.
///
/// A cell holds the text's polarity when the keyword occurs in it
/// (case-insensitive), otherwise exactly 0.0. Matching texts are scored
/// again with `lexicon`.
pub fn keyword_heatmap(keywords: &[String], texts: &[String], lexicon: &PolarityLexicon) -> Chart {
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();

    let matrix = keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.to_lowercase();
            texts
                .iter()
                .zip(&lowered)
                .map(|(text, lower)| {
                    if lower.contains(&keyword) {
                        lexicon.polarity(text)
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();

    Chart::new(
        "Sentiment Heatmap by Keyword",
        "Sentiments mapped to specific keywords",
        ChartData::Heatmap {
            row_labels: keywords.to_vec(),
            matrix,
        },
    )
}

/// All six charts in display order
pub fn build_all(
    analysis: &Analysis,
    keywords: &[String],
    lexicon: &PolarityLexicon,
    histogram_bins: usize,
) -> Vec<Chart> {
    let scores = analysis.scores();
    let texts = analysis.texts();

    vec![
        average_bar(scores),
        distribution_pie(scores),
        histogram(scores, histogram_bins),
        sequential_line(scores),
        length_scatter(scores, texts),
        keyword_heatmap(keywords, texts, lexicon),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Scored, TranslationOutcome};
    use approx::assert_relative_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_average_bar() {
        let chart = average_bar(&[1.0, -1.0, 0.0, 0.5]);
        match chart.data {
            ChartData::Bar { value, .. } => assert_relative_eq!(value, 0.125),
            other => panic!("unexpected data: {other:?}"),
        }
        assert_eq!(chart.kind(), ChartKind::AverageBar);
    }

    #[test]
    fn test_average_single_value() {
        match average_bar(&[-0.4]).data {
            ChartData::Bar { value, .. } => assert_relative_eq!(value, -0.4),
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_pie_counts() {
        assert_eq!(sentiment_counts(&[0.5, -0.2, 0.0, 0.0]), (1, 1, 2));

        let chart = distribution_pie(&[0.5, -0.2, 0.0, 0.0]);
        let ChartData::Pie { slices } = chart.data else {
            panic!("expected pie data");
        };
        let counts: Vec<usize> = slices.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![1, 1, 2]);
        assert_relative_eq!(slices[2].percent, 50.0);
        assert_relative_eq!(slices.iter().map(|s| s.percent).sum::<f64>(), 100.0);
    }

    #[test]
    fn test_pie_counts_sum() {
        let scores = [0.1, 0.2, -0.3, 0.0, 1.0, -1.0, 0.0];
        let (p, n, z) = sentiment_counts(&scores);
        assert_eq!(p + n + z, scores.len());
    }

    #[test]
    fn test_histogram_bins() {
        let scores = [-1.0, -0.5, 0.0, 0.5, 1.0];
        let ChartData::Histogram { bins } = histogram(&scores, 10).data else {
            panic!("expected histogram data");
        };

        assert_eq!(bins.len(), 10);
        assert_relative_eq!(bins[0].start, -1.0);
        assert_relative_eq!(bins[9].end, 1.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        // maximum lands in the closed last bin
        assert_eq!(bins[9].count, 1);
        assert_eq!(bins[5].count, 1);
    }

    #[test]
    fn test_histogram_single_value() {
        let ChartData::Histogram { bins } = histogram(&[0.0], 10).data else {
            panic!("expected histogram data");
        };
        assert_relative_eq!(bins[0].start, -0.5);
        assert_relative_eq!(bins[9].end, 0.5);
        assert_eq!(bins[5].count, 1);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 1);
    }

    #[test]
    fn test_sequential_line() {
        let ChartData::Line { points } = sequential_line(&[0.1, -0.2, 0.3]).data else {
            panic!("expected line data");
        };
        assert_eq!(points, vec![(0.0, 0.1), (1.0, -0.2), (2.0, 0.3)]);
    }

    #[test]
    fn test_length_scatter_counts_chars() {
        let texts = strings(&["Great!", "ação"]);
        let ChartData::Scatter { points } = length_scatter(&[0.8, 0.0], &texts).data else {
            panic!("expected scatter data");
        };
        assert_eq!(points, vec![(6.0, 0.8), (4.0, 0.0)]);
    }

    #[test]
    fn test_heatmap_case_insensitive() {
        let lexicon = PolarityLexicon::new();
        let keywords = strings(&["great", "day"]);
        let texts = strings(&["This is Great!", "Bad day"]);

        let ChartData::Heatmap { row_labels, matrix } =
            keyword_heatmap(&keywords, &texts, &lexicon).data
        else {
            panic!("expected heatmap data");
        };

        assert_eq!(row_labels, keywords);
        assert!(matrix[0][0] != 0.0);
        assert_eq!(matrix[0][1], 0.0);
        assert_eq!(matrix[1][0], 0.0);
        assert_relative_eq!(matrix[1][1], -0.7);
    }

    #[test]
    fn test_heatmap_uppercase_keyword() {
        let lexicon = PolarityLexicon::new();
        let chart = keyword_heatmap(&strings(&["GREAT", "x"]), &strings(&["great job"]), &lexicon);
        let ChartData::Heatmap { matrix, .. } = chart.data else {
            panic!("expected heatmap data");
        };
        assert_relative_eq!(matrix[0][0], 0.8);
    }

    #[test]
    fn test_build_all_order() {
        let analysis: Analysis = ["good", "bad"]
            .iter()
            .zip([0.7, -0.7])
            .map(|(text, polarity)| Scored {
                polarity,
                text: text.to_string(),
                outcome: TranslationOutcome::AlreadyEnglish,
            })
            .collect();

        let charts = build_all(&analysis, &strings(&["good", "bad"]), &PolarityLexicon::new(), 10);
        let kinds: Vec<ChartKind> = charts.iter().map(Chart::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::AverageBar,
                ChartKind::DistributionPie,
                ChartKind::Histogram,
                ChartKind::SequentialLine,
                ChartKind::LengthScatter,
                ChartKind::KeywordHeatmap,
            ]
        );
    }
}
