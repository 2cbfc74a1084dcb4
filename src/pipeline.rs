use log::debug;

use crate::config::Config;
use crate::error::MinifyError;
use crate::passes::{
    Pass, comments::StripComments, newlines::FlattenNewlines, operators::TightenOperators,
    whitespace::CollapseWhitespace,
};

/// Ordered list of passes to run over a script.
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
    keep_shebang: bool,
}

impl Pipeline {
    /// Build the pipeline from configuration.
    pub fn from_config(config: &Config) -> Self {
        // comment and whitespace passes always run
        let mut passes: Vec<Box<dyn Pass>> =
            vec![Box::new(StripComments), Box::new(CollapseWhitespace)];
        if config.passes.flatten_newlines {
            passes.push(Box::new(FlattenNewlines));
        }
        if config.passes.tighten_operators {
            passes.push(Box::new(TightenOperators));
        }

        Self {
            passes,
            keep_shebang: config.settings.keep_shebang,
        }
    }

    /// Names of the configured passes, in run order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass in sequence, each on the previous pass's output.
    pub fn run(&self, source: &str) -> Result<String, MinifyError> {
        if self.keep_shebang && source.starts_with("#!") {
            let (shebang, body) = source.split_once('\n').unwrap_or((source, ""));
            let minified = self.run_passes(body)?;
            return Ok(format!("{shebang}\n{minified}"));
        }
        self.run_passes(source)
    }

    fn run_passes(&self, source: &str) -> Result<String, MinifyError> {
        let mut text = source.to_string();
        for pass in &self.passes {
            let before = text.len();
            text = pass.apply(&text).map_err(|e| e.in_pass(pass.name()))?;
            debug!("{} pass: {} -> {} bytes", pass.name(), before, text.len());
        }
        Ok(text)
    }
}
