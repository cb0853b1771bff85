use clap::Parser;
use colored::*;
use proxy2gateway::cli::{Cli, ColorChoice};
use proxy2gateway::diagnostics::{Diagnostics, Severity};
use proxy2gateway::{convert, ConvertOptions, EmitterOptions};
use std::fs;
use std::process;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();

    // Set up color output
    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }

    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::OFF
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    if !cli.http_proxies.exists() {
        return Err(format!("File not found: {}", cli.http_proxies.display()));
    }
    if let Some(base_gateway) = &cli.base_gateway {
        if !base_gateway.exists() {
            return Err(format!("File not found: {}", base_gateway.display()));
        }
    }

    let options = ConvertOptions {
        emitter_options: EmitterOptions {
            include_gateway: !cli.routes_only,
        },
    };

    let result = convert(&cli.http_proxies, cli.base_gateway.as_deref(), options)
        .map_err(|e| e.to_string())?;

    if !cli.quiet {
        print_diagnostics(&result.diagnostics, cli.verbose);
    }

    if let Some(output_path) = &cli.output {
        fs::write(output_path, &result.yaml_output)
            .map_err(|e| format!("Failed to write output: {}", e))?;
        if !cli.quiet {
            eprintln!(
                "{} Wrote {} resources to {}",
                "Success:".green().bold(),
                resource_count(&result.translation),
                output_path.display()
            );
        }
    } else {
        print!("{}", result.yaml_output);
    }

    Ok(())
}

fn resource_count(translation: &proxy2gateway::Translation) -> usize {
    usize::from(translation.gateway.is_some())
        + translation.http_routes.len()
        + translation.tls_routes.len()
}

fn print_diagnostics(diagnostics: &Diagnostics, verbose: u8) {
    for warning in &diagnostics.warnings {
        if warning.severity == Severity::Info && verbose == 0 {
            continue;
        }

        let prefix = match warning.severity {
            Severity::Info => "info".blue(),
            Severity::Warning => "warning".yellow(),
            Severity::Error => "error".red(),
        };

        eprintln!("{}: {}", prefix, warning.message);
        eprintln!("  --> HTTPProxy {}", warning.resource);

        if let Some(suggestion) = &warning.suggestion {
            eprintln!("  = {}: {}", "suggestion".green(), suggestion);
        }
        eprintln!();
    }

    if verbose > 0 && !diagnostics.skipped.is_empty() {
        eprintln!("{}", "Skipped HTTPProxies:".yellow());
        for skipped in &diagnostics.skipped {
            eprintln!("  - {} ({})", skipped.resource, skipped.reason);
        }
        eprintln!();
    }

    if verbose > 0 {
        eprintln!("{}", "Conversion summary:".bold());
        eprintln!("  Converted: {} HTTPProxies", diagnostics.converted.len());
        eprintln!("  Warnings: {}", diagnostics.warning_count());
        eprintln!("  Skipped: {}", diagnostics.skipped.len());
    }
}
