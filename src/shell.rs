//! Interactive menu loop
//!
//! Commands: `!h` help, `!e` exit, `!s` start a run.

use crate::api::{Connector, Translator};
use crate::charts::{self, ChartDisplay};
use crate::defaults;
use crate::error::AppError;
use crate::pipeline::{validate_inputs, AnalysisPipeline};
use crate::sentiment::SentimentScorer;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

const PROMPT: &str = "$>. ";

/// Shell behaviour switches
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Comments fetched per run
    pub comment_limit: usize,
    /// Histogram bin count
    pub histogram_bins: usize,
    /// Clear the terminal before each menu
    pub clear_screen: bool,
    /// Wait for Enter after each chart
    pub pause_between_charts: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            comment_limit: defaults::COMMENT_LIMIT,
            histogram_bins: defaults::HISTOGRAM_BINS,
            clear_screen: true,
            pause_between_charts: true,
        }
    }
}

/// Menu-driven front end over validation, pipeline and charts
pub struct Shell<'a, T, R, W> {
    connector: &'a dyn Connector,
    scorer: &'a SentimentScorer<T>,
    display: &'a mut dyn ChartDisplay,
    input: R,
    output: W,
    options: ShellOptions,
}

impl<'a, T, R, W> Shell<'a, T, R, W>
where
    T: Translator,
    R: BufRead,
    W: Write,
{
    pub fn new(
        connector: &'a dyn Connector,
        scorer: &'a SentimentScorer<T>,
        display: &'a mut dyn ChartDisplay,
        input: R,
        output: W,
        options: ShellOptions,
    ) -> Self {
        Self {
            connector,
            scorer,
            display,
            input,
            output,
            options,
        }
    }

    /// Run the menu until `!e` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.clear_screen()?;
            self.print_menu()?;

            let Some(choice) = self.read_line()? else {
                info!("input closed, leaving shell");
                return Ok(());
            };

            match choice.trim() {
                "!h" => self.help()?,
                "!e" => return Ok(()),
                "!s" => self.start()?,
                _ => {}
            }
        }
    }

    /// Prompt for topic and keywords, then analyze
    pub fn start(&mut self) -> io::Result<()> {
        self.clear_screen()?;
        write!(
            self.output,
            "Please provide a topic name that you want to search:\n{PROMPT}"
        )?;
        self.output.flush()?;
        let topic = self.read_line()?.unwrap_or_default();

        write!(self.output, "Please provide some keywords:\n{PROMPT}")?;
        self.output.flush()?;
        let keywords: Vec<String> = self
            .read_line()?
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if let Err(err) = self.analyze(&topic, &keywords) {
            debug!(error = %err, "run failed");
            writeln!(self.output, "Error: {err}")?;
            write!(self.output, "Press Enter to return to the menu.")?;
            self.output.flush()?;
            self.read_line()?;
        }
        Ok(())
    }

    /// Validate, fetch, score and show all six charts
    pub fn analyze(&mut self, topic: &str, keywords: &[String]) -> Result<(), AppError> {
        validate_inputs(topic, keywords)?;

        info!(topic = topic.trim(), keywords = keywords.len(), "starting analysis");
        let session = self.connector.connect()?;
        let pipeline = AnalysisPipeline::new(self.scorer);
        let analysis = pipeline.run(session.as_ref(), topic, self.options.comment_limit)?;

        let charts = charts::build_all(
            &analysis,
            keywords,
            self.scorer.lexicon(),
            self.options.histogram_bins,
        );
        let total = charts.len();
        for (i, chart) in charts.iter().enumerate() {
            self.display.show(chart)?;
            if self.options.pause_between_charts {
                let next = if i + 1 < total { "next chart" } else { "menu" };
                write!(self.output, "\nPress Enter for the {next}.")?;
                self.output.flush()?;
                self.read_line()?;
            }
        }
        Ok(())
    }

    fn help(&mut self) -> io::Result<()> {
        self.clear_screen()?;
        writeln!(self.output, " ________________________________________________________________")?;
        writeln!(self.output, "| For the algorithm to work as expected you have to:")?;
        writeln!(self.output, "| I.  Type a subreddit name without whitespace")?;
        writeln!(self.output, "| II. Type two or more keywords separated by spaces")?;
        writeln!(self.output, "|")?;
        writeln!(self.output, "| Comments are fetched from Reddit, translated to English when")?;
        writeln!(self.output, "| a translation service is configured, and scored from -1 to 1.")?;
        writeln!(self.output, "|")?;
        writeln!(self.output, "| Type anything to return to main program.")?;
        write!(
            self.output,
            "|_________________________________________________________________\n\n{PROMPT}"
        )?;
        self.output.flush()?;
        self.read_line()?;
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, " _______________________________________________________")?;
        writeln!(self.output, "| Welcome to the SentimentPolarity Application")?;
        writeln!(self.output, "| Type !h for help")?;
        writeln!(self.output, "| Type !e to exit the program")?;
        writeln!(self.output, "| Type !s to start the program")?;
        write!(
            self.output,
            "|_______________________________________________________\n\n{PROMPT}"
        )?;
        self.output.flush()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        if self.options.clear_screen {
            write!(self.output, "\x1B[2J\x1B[1;1H")?;
        }
        Ok(())
    }

    /// One line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommentSource, DisabledTranslator, FetchError};
    use crate::charts::Chart;
    use crate::models::Comment;
    use crate::sentiment::PolarityLexicon;
    use std::cell::Cell;
    use std::io::Cursor;

    struct FixedSource(Vec<&'static str>);

    impl CommentSource for FixedSource {
        fn fetch_comments(&self, _topic: &str, limit: usize) -> Result<Vec<Comment>, FetchError> {
            Ok(self
                .0
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, body)| Comment::new(i, *body))
                .collect())
        }
    }

    struct FixedConnector {
        comments: Vec<&'static str>,
        connects: Cell<usize>,
    }

    impl FixedConnector {
        fn new(comments: Vec<&'static str>) -> Self {
            Self {
                comments,
                connects: Cell::new(0),
            }
        }
    }

    impl Connector for FixedConnector {
        fn connect(&self) -> Result<Box<dyn CommentSource>, FetchError> {
            self.connects.set(self.connects.get() + 1);
            Ok(Box::new(FixedSource(self.comments.clone())))
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        shown: Vec<Chart>,
    }

    impl ChartDisplay for RecordingDisplay {
        fn show(&mut self, chart: &Chart) -> io::Result<()> {
            self.shown.push(chart.clone());
            Ok(())
        }
    }

    fn options() -> ShellOptions {
        ShellOptions {
            clear_screen: false,
            ..ShellOptions::default()
        }
    }

    fn run_shell(
        connector: &FixedConnector,
        display: &mut RecordingDisplay,
        input: &str,
    ) -> String {
        let scorer = SentimentScorer::new(PolarityLexicon::new(), DisabledTranslator);
        let mut output = Vec::new();
        {
            let mut shell = Shell::new(
                connector,
                &scorer,
                display,
                Cursor::new(input.as_bytes()),
                &mut output,
                options(),
            );
            shell.run().unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_command() {
        let connector = FixedConnector::new(vec!["good"]);
        let mut display = RecordingDisplay::default();
        let output = run_shell(&connector, &mut display, "!e\n!s\n");

        assert!(output.contains("Welcome to the SentimentPolarity Application"));
        assert_eq!(connector.connects.get(), 0);
        assert!(display.shown.is_empty());
    }

    #[test]
    fn test_help_returns_to_menu() {
        let connector = FixedConnector::new(vec![]);
        let mut display = RecordingDisplay::default();
        let output = run_shell(&connector, &mut display, "!h\nanything\n!e\n");

        assert!(output.contains("Type anything to return to main program."));
        assert_eq!(output.matches("Welcome to the SentimentPolarity").count(), 2);
    }

    #[test]
    fn test_start_shows_six_charts() {
        let connector = FixedConnector::new(vec!["great stuff", "awful day", "meh"]);
        let mut display = RecordingDisplay::default();
        let input = "!s\nrust\ngreat day\n\n\n\n\n\n\n!e\n";
        let output = run_shell(&connector, &mut display, input);

        assert_eq!(display.shown.len(), 6);
        assert_eq!(connector.connects.get(), 1);
        assert!(!output.contains("Error:"));
        assert!(output.contains("Press Enter for the menu."));
    }

    #[test]
    fn test_invalid_input_skips_network() {
        let connector = FixedConnector::new(vec!["good"]);
        let mut display = RecordingDisplay::default();
        let output = run_shell(&connector, &mut display, "!s\nrust\nonly\n\n!e\n");

        assert!(output.contains("Error: Please provide at least two keywords."));
        assert_eq!(connector.connects.get(), 0);
        assert!(display.shown.is_empty());
    }

    #[test]
    fn test_empty_fetch_shows_no_charts() {
        let connector = FixedConnector::new(vec![]);
        let mut display = RecordingDisplay::default();
        let output = run_shell(&connector, &mut display, "!s\nquiet\na b\n\n!e\n");

        assert!(output.contains("Error: No comments were retrieved."));
        assert!(display.shown.is_empty());
    }

    #[test]
    fn test_end_of_input_exits() {
        let connector = FixedConnector::new(vec![]);
        let mut display = RecordingDisplay::default();
        let output = run_shell(&connector, &mut display, "unknown\n");

        assert_eq!(output.matches("Welcome to the SentimentPolarity").count(), 2);
    }
}
