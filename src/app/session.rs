use crate::app::console::Console;
use crate::app::pager::{page_raw_data, NOT_UNDERSTOOD};
use crate::app::prompts::collect_filters;
use crate::app::report::{render_json, render_text};
use crate::core::engine::{Analysis, StatsEngine};
use crate::core::pager::DEFAULT_PAGE_SIZE;
use crate::core::Pipeline;
use crate::domain::model::{Filters, OutputFormat};
use crate::utils::error::{BikeshareError, Result};
use crate::utils::validation::parse_yes_no;
use std::io::{BufRead, Write};

const RAW_PROMPT: &str = "\nCheck out the first lines of raw data? Enter yes or no.\n";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub page_size: usize,
    pub format: OutputFormat,
    /// Used in place of the prompts for the first iteration only.
    pub preset: Option<Filters>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            format: OutputFormat::Text,
            preset: None,
        }
    }
}

pub struct Session<P: Pipeline> {
    engine: StatsEngine<P>,
    options: SessionOptions,
}

impl<P: Pipeline> Session<P> {
    pub fn new(engine: StatsEngine<P>, options: SessionOptions) -> Self {
        Self { engine, options }
    }

    /// Runs analyses until the user declines to restart or input ends.
    /// Returns the number of iterations started.
    pub async fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<usize> {
        let mut preset = self.options.preset;
        let mut iterations = 0;

        loop {
            iterations += 1;
            match self.iteration(console, preset.take()).await {
                Ok(()) => {}
                Err(BikeshareError::InputClosed) => {
                    tracing::info!("Input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            }

            match console.ask(RESTART_PROMPT) {
                Ok(answer) if parse_yes_no(&answer) == Some(true) => continue,
                Ok(_) | Err(BikeshareError::InputClosed) => break,
                Err(e) => return Err(e),
            }
        }

        tracing::info!("👋 Session finished after {} analyses", iterations);
        Ok(iterations)
    }

    async fn iteration<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        preset: Option<Filters>,
    ) -> Result<()> {
        let filters = match preset {
            Some(filters) => {
                console.say(&format!("Using filters from the command line: {}", filters))?;
                filters
            }
            None => collect_filters(console)?,
        };

        let analysis = match self.engine.run(&filters).await {
            Ok(analysis) => analysis,
            Err(e) if e.is_recoverable() => {
                tracing::error!("❌ Analysis failed: {} (Category: {:?})", e, e.category());
                console.say(&format!("\n❌ {}", e.user_friendly_message()))?;
                console.say(&format!("💡 {}", e.recovery_suggestion()))?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        self.print_report(console, &analysis)?;

        let show_raw = console.confirm(RAW_PROMPT, NOT_UNDERSTOOD)?;
        if show_raw {
            page_raw_data(console, &analysis.table, self.options.page_size)?;
        }
        Ok(())
    }

    fn print_report<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        analysis: &Analysis,
    ) -> Result<()> {
        let rendered = match self.options.format {
            OutputFormat::Text => render_text(&analysis.filters, &analysis.report),
            OutputFormat::Json => render_json(&analysis.filters, &analysis.report)?,
        };
        console.say(&rendered)
    }
}
