//! Text-based chart display for terminal output

use super::{Chart, ChartData, ChartDisplay, HistogramBin, PieSlice};
use crate::config::ChartSettings;
use crate::defaults::{MIN_CHART_HEIGHT, MIN_CHART_WIDTH};
use colored::{Color, Colorize};
use std::io::{self, Write};

/// Heatmap shading by magnitude
const SHADES: [char; 4] = ['░', '▒', '▓', '█'];

/// Width of the y-axis label column
const Y_LABEL_WIDTH: usize = 6;

/// Draws charts as text on any writer
pub struct TerminalDisplay<W: Write> {
    out: W,
    settings: ChartSettings,
}

impl<W: Write> TerminalDisplay<W> {
    /// Areas smaller than the drawable minimum are widened to it.
    pub fn new(out: W, mut settings: ChartSettings) -> Self {
        settings.width = settings.width.max(MIN_CHART_WIDTH);
        settings.height = settings.height.max(MIN_CHART_HEIGHT);
        Self { out, settings }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.settings.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&mut self, chart: &Chart) -> io::Result<()> {
        let title = if self.settings.color {
            chart.title.bold().to_string()
        } else {
            chart.title.clone()
        };
        writeln!(self.out)?;
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(chart.title.chars().count()))?;
        let subtitle = self.paint(&format!("(Example: {})", chart.subtitle), Color::BrightBlack);
        writeln!(self.out, "{subtitle}")?;
        if let Some(y_label) = &chart.y_label {
            writeln!(self.out, "y: {y_label}")?;
        }
        writeln!(self.out)
    }

    fn footer(&mut self, chart: &Chart) -> io::Result<()> {
        if let Some(x_label) = &chart.x_label {
            writeln!(self.out, "{:>width$}x: {x_label}", "", width = Y_LABEL_WIDTH)?;
        }
        Ok(())
    }

    fn draw_bar(&mut self, label: &str, value: f64) -> io::Result<()> {
        let half = self.settings.width / 2;
        let length = ((value.abs().min(1.0)) * half as f64).round() as usize;
        let bar = self.paint(&"█".repeat(length), Color::Blue);

        let line = if value >= 0.0 {
            format!("{}│{}", " ".repeat(half), bar)
        } else {
            format!("{}{}│", " ".repeat(half - length), bar)
        };
        writeln!(self.out, "{line}")?;
        writeln!(
            self.out,
            "-1{}0{}1",
            "─".repeat(half.saturating_sub(2)),
            "─".repeat(half.saturating_sub(1))
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "{label}: {value:.3}")
    }

    fn draw_pie(&mut self, slices: &[PieSlice]) -> io::Result<()> {
        let label_width = slices.iter().map(|s| s.label.len()).max().unwrap_or(8);
        for slice in slices {
            let color = match slice.label.as_str() {
                "Positive" => Color::Green,
                "Negative" => Color::Red,
                _ => Color::BrightBlack,
            };
            let length = (slice.percent / 100.0 * self.settings.width as f64).round() as usize;
            let bar = self.paint(&"█".repeat(length), color);
            writeln!(
                self.out,
                "{:>label_width$} │{bar} {:5.1}% ({})",
                slice.label, slice.percent, slice.count,
            )?;
        }
        Ok(())
    }

    fn draw_histogram(&mut self, bins: &[HistogramBin]) -> io::Result<()> {
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for (i, bin) in bins.iter().enumerate() {
            let close = if i + 1 == bins.len() { ']' } else { ')' };
            let length = bin.count * self.settings.width / max_count;
            let bar = self.paint(&"█".repeat(length), Color::Cyan);
            writeln!(
                self.out,
                "[{:>6.2}, {:>6.2}{close} │{bar} {}",
                bin.start, bin.end, bin.count
            )?;
        }
        Ok(())
    }

    /// Plot points on a polarity canvas; `connect` joins consecutive points
    fn draw_xy(&mut self, points: &[(f64, f64)], connect: bool, color: Color) -> io::Result<()> {
        let width = self.settings.width;
        let height = self.settings.height;
        let mut canvas = vec![vec![' '; width]; height];

        let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let column = |x: f64| -> usize {
            if x_max > x_min {
                (((x - x_min) / (x_max - x_min)) * (width - 1) as f64).round() as usize
            } else {
                0
            }
        };
        let row = |y: f64| -> usize {
            (((1.0 - y.clamp(-1.0, 1.0)) / 2.0) * (height - 1) as f64).round() as usize
        };

        let zero_row = row(0.0);
        for cell in canvas[zero_row].iter_mut() {
            *cell = '─';
        }

        if connect {
            for pair in points.windows(2) {
                let (c0, r0) = (column(pair[0].0), row(pair[0].1) as f64);
                let (c1, r1) = (column(pair[1].0), row(pair[1].1) as f64);
                for c in c0 + 1..c1 {
                    let t = (c - c0) as f64 / (c1 - c0) as f64;
                    let r = (r0 + (r1 - r0) * t).round() as usize;
                    canvas[r][c] = '·';
                }
            }
        }
        for &(x, y) in points {
            canvas[row(y)][column(x)] = '●';
        }

        for (r, cells) in canvas.iter().enumerate() {
            let label = if r == 0 {
                format!("{:>5.2}", 1.0)
            } else if r == zero_row {
                format!("{:>5.2}", 0.0)
            } else if r == height - 1 {
                format!("{:>5.2}", -1.0)
            } else {
                String::new()
            };
            let tick = if label.is_empty() { '│' } else { '┤' };
            let line: String = cells
                .iter()
                .map(|&ch| match ch {
                    '●' | '·' => self.paint(&ch.to_string(), color),
                    _ => ch.to_string(),
                })
                .collect();
            writeln!(self.out, "{label:>w$}{tick}{line}", w = Y_LABEL_WIDTH - 1)?;
        }

        writeln!(self.out, "{:>w$}└{}", "", "─".repeat(width), w = Y_LABEL_WIDTH - 1)?;
        let left = format!("{x_min:.0}");
        let right = format!("{x_max:.0}");
        writeln!(
            self.out,
            "{:>w$}{left}{:>gap$}",
            "",
            right,
            w = Y_LABEL_WIDTH,
            gap = width.saturating_sub(left.len()),
        )
    }

    /// One row per keyword. Texts are grouped into at most `width` columns;
    /// a grouped cell shows its strongest value.
    fn draw_heatmap(&mut self, row_labels: &[String], matrix: &[Vec<f64>]) -> io::Result<()> {
        let label_width = row_labels.iter().map(|l| l.chars().count()).max().unwrap_or(6);
        let columns = matrix.first().map(Vec::len).unwrap_or(0);
        let group = columns.div_ceil(self.settings.width).max(1);

        for (label, row) in row_labels.iter().zip(matrix) {
            let cells: String = row
                .chunks(group)
                .map(|chunk| {
                    let value = chunk
                        .iter()
                        .copied()
                        .fold(0.0_f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
                    self.cell(value)
                })
                .collect();
            writeln!(self.out, "{label:>label_width$} │{cells}")?;
        }

        let negative = self.paint("█", Color::Red);
        let positive = self.paint("█", Color::Green);
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{negative} negative   · neutral / no match   {positive} positive"
        )?;
        if group > 1 {
            writeln!(self.out, "(each column covers {group} comments)")?;
        }
        Ok(())
    }

    fn cell(&self, value: f64) -> String {
        if value == 0.0 {
            return "·".to_string();
        }
        let level = ((value.abs() * SHADES.len() as f64).ceil() as usize).clamp(1, SHADES.len());
        let shade = SHADES[level - 1].to_string();
        let color = if value > 0.0 { Color::Green } else { Color::Red };
        self.paint(&shade, color)
    }
}

impl<W: Write> ChartDisplay for TerminalDisplay<W> {
    fn show(&mut self, chart: &Chart) -> io::Result<()> {
        self.header(chart)?;
        match &chart.data {
            ChartData::Bar { label, value } => self.draw_bar(label, *value)?,
            ChartData::Pie { slices } => self.draw_pie(slices)?,
            ChartData::Histogram { bins } => self.draw_histogram(bins)?,
            ChartData::Line { points } => self.draw_xy(points, true, Color::Blue)?,
            ChartData::Scatter { points } => self.draw_xy(points, false, Color::Magenta)?,
            ChartData::Heatmap { row_labels, matrix } => self.draw_heatmap(row_labels, matrix)?,
        }
        self.footer(chart)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{
        average_bar, distribution_pie, histogram, keyword_heatmap, length_scatter, sequential_line,
    };
    use crate::sentiment::PolarityLexicon;

    fn plain() -> ChartSettings {
        ChartSettings {
            width: 20,
            height: 5,
            color: false,
        }
    }

    fn render(chart: &Chart) -> String {
        let mut display = TerminalDisplay::new(Vec::new(), plain());
        display.show(chart).unwrap();
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn test_bar_output() {
        let output = render(&average_bar(&[1.0, -1.0, 0.0, 0.5]));
        assert!(output.contains("Average Sentiment of Comments"));
        assert!(output.contains("Average Sentiment: 0.125"));
        assert!(output.contains("│█"));
    }

    #[test]
    fn test_negative_bar() {
        let output = render(&average_bar(&[-1.0]));
        assert!(output.contains("██████████│"));
    }

    #[test]
    fn test_pie_output() {
        let output = render(&distribution_pie(&[0.5, -0.2, 0.0, 0.0]));
        assert!(output.contains(" 25.0% (1)"));
        assert!(output.contains(" 50.0% (2)"));
    }

    #[test]
    fn test_histogram_output() {
        let output = render(&histogram(&[0.2], 10));
        assert_eq!(output.matches('[').count(), 10);
        assert!(output.contains("]"));
        assert!(output.contains("x: Sentiment Polarity (-1 to 1)"));
    }

    #[test]
    fn test_line_output() {
        let output = render(&sequential_line(&[1.0, -1.0, 0.5]));
        assert_eq!(output.matches('●').count(), 3);
        assert!(output.contains(" 1.00┤"));
        assert!(output.contains("-1.00┤"));
        assert!(output.contains("x: Comment Index"));
    }

    #[test]
    fn test_single_point_line() {
        let output = render(&sequential_line(&[0.0]));
        assert_eq!(output.matches('●').count(), 1);
    }

    #[test]
    fn test_scatter_output() {
        let texts = vec!["short".to_string(), "a much longer comment".to_string()];
        let output = render(&length_scatter(&[0.4, -0.4], &texts));
        assert_eq!(output.matches('●').count(), 2);
        assert!(!output.contains('·'));
    }

    #[test]
    fn test_heatmap_output() {
        let keywords = vec!["great".to_string(), "day".to_string()];
        let texts = vec!["This is Great!".to_string(), "Bad day".to_string()];
        let chart = keyword_heatmap(&keywords, &texts, &PolarityLexicon::new());
        let output = render(&chart);

        assert!(output.contains("great │█·"));
        assert!(output.contains("  day │·▓"));
    }

    #[test]
    fn test_degenerate_area_clamped() {
        let settings = ChartSettings {
            width: 0,
            height: 0,
            color: false,
        };
        let mut display = TerminalDisplay::new(Vec::new(), settings);
        display.show(&sequential_line(&[1.0, -1.0, 0.5])).unwrap();
        display.show(&average_bar(&[-1.0])).unwrap();
        let output = String::from_utf8(display.into_inner()).unwrap();

        assert_eq!(output.matches('●').count(), 3);
        assert!(output.contains(&format!("└{}", "─".repeat(MIN_CHART_WIDTH))));
        assert_eq!(output.matches('┤').count(), 3);
    }

    #[test]
    fn test_heatmap_groups_columns() {
        let keywords = vec!["a".to_string(), "b".to_string()];
        let texts: Vec<String> = (0..45).map(|_| "a good one".to_string()).collect();
        let chart = keyword_heatmap(&keywords, &texts, &PolarityLexicon::new());
        let output = render(&chart);

        assert!(output.contains("each column covers 3 comments"));
    }
}
