//! gdoc CLI library
//!
//! This module contains the core CLI logic for the gdoc documentation tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use gdoc::{DocBuilder, GdocError, analysis::SourceAnalysis};

/// Run the gdoc CLI application
///
/// This function reads an analyzer dump, builds the resolved document
/// model, and writes the AsciiDoc document to the output file. Warnings
/// are logged by the build as they are reported and do not stop the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GdocError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed analysis input
/// - Packages the analyzer could not load
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), GdocError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Documenting module"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let analysis = load_analysis(&args.input)?;

    // Build and render using the DocBuilder API
    let builder = DocBuilder::new(app_config);
    let output = builder.build(&analysis)?;

    builder.export_asciidoc(&output.module, &args.output)?;

    info!(output_file = args.output; "AsciiDoc exported successfully");

    Ok(())
}

/// Reads an analyzer dump from a TOML file.
fn load_analysis(path: impl AsRef<Path>) -> Result<SourceAnalysis, GdocError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| GdocError::Input(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_analysis() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("analysis.toml");
        fs::write(
            &path,
            r#"
module = "example.com/m"

[[packages]]
import_path = "example.com/m"
name = "m"

[[packages.funcs]]
name = "Run"
"#,
        )
        .expect("write analysis");

        let analysis = load_analysis(&path).expect("load");

        assert_eq!(analysis.module, "example.com/m");
        assert_eq!(analysis.packages[0].funcs[0].name, "Run");
    }

    #[test]
    fn test_malformed_analysis() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("analysis.toml");
        fs::write(&path, "packages = 3").expect("write analysis");

        let err = load_analysis(&path).expect_err("malformed");

        assert!(matches!(err, GdocError::Input(_)));
    }

    #[test]
    fn test_misspelled_analysis_key() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("analysis.toml");
        fs::write(
            &path,
            r#"
module = "example.com/m"

[[packages]]
import_path = "example.com/m"
name = "m"

[[packages.types]]
name = "Order"

[[packages.types.fields]]
names = ["Total"]
type_expr = "int"
"#,
        )
        .expect("write analysis");

        let err = load_analysis(&path).expect_err("unknown key");

        match err {
            GdocError::Input(message) => assert!(message.contains("type_expr"), "{message}"),
            other => panic!("Expected input error, got {other:?}"),
        }
    }

    #[test]
    fn test_run_with_warnings_writes_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("analysis.toml");
        let config = dir.path().join("config.toml");
        let output = dir.path().join("doc.adoc");
        fs::write(
            &input,
            r#"
module = "example.com/m"

[[packages]]
import_path = "example.com/m"
name = "m"

[[packages.types]]
name = "Feed"

[[packages.types.fields]]
names = ["Updates"]
type = "<-chan int"
"#,
        )
        .expect("write analysis");
        fs::write(&config, "").expect("write config");

        let args = Args {
            input: input.display().to_string(),
            output: output.display().to_string(),
            config: Some(config.display().to_string()),
            log_level: "off".to_string(),
        };
        run(&args).expect("warnings are not fatal");

        let document = fs::read_to_string(&output).expect("read document");
        assert!(document.contains("<-chan int"));
    }

    #[test]
    fn test_missing_analysis() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_analysis(dir.path().join("absent.toml")).expect_err("missing");

        assert!(matches!(err, GdocError::Io(_)));
    }
}
