//! Annotate command handler

use super::analysis::{analyze_source, load_record};
use crate::commands::AnnotateArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::GutterRenderer;
use tracecov::ClassifiedFile;

/// Execute the annotate command
pub fn execute_annotate(config: &CliConfig, args: &AnnotateArgs) -> CliResult<()> {
    let record = load_record(config)?;
    let (text, file) = analyze_source(config, record.as_ref(), &args.source)?;
    print!("{}", render_annotation(config, args, &text, &file));
    if !config.verbosity.is_quiet() {
        eprintln!("{}: {}", args.source.display(), file.summary);
    }
    Ok(())
}

/// Render the annotated listing for `text`
#[must_use]
pub fn render_annotation(
    config: &CliConfig,
    args: &AnnotateArgs,
    text: &str,
    file: &ClassifiedFile,
) -> String {
    GutterRenderer::new(config.color.should_color())
        .with_line_numbers(!args.no_line_numbers)
        .render(text, file)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use std::path::PathBuf;
    use tracecov::analyze;

    #[test]
    fn test_render_annotation_plain() {
        let config = CliConfig::new().with_color(ColorChoice::Never);
        let args = AnnotateArgs {
            source: PathBuf::from("m.py"),
            no_line_numbers: true,
        };
        let text = "x = 1\ny = 2";
        let file = analyze(text, None);
        assert_eq!(render_annotation(&config, &args, text, &file), "- x = 1\n- y = 2\n");
    }
}
