use anyhow::Result;
use colored::Colorize;
use viper::{build_project, write_outputs, BuildOutput, ViperConfig};

pub fn execute(config: &ViperConfig) -> Result<()> {
    println!("{}", "Building routes...".green().bold());
    println!();

    let output = build_project(config)?;
    report(config, &output)?;
    Ok(())
}

/// Writes the outputs of a build and prints what happened
pub fn report(config: &ViperConfig, output: &BuildOutput) -> Result<()> {
    for diagnostic in &output.diagnostics {
        println!(
            "  {} {}: {}",
            "⚠".yellow(),
            diagnostic.path.display(),
            diagnostic.message
        );
    }

    let written = write_outputs(config, output)?;
    let status = |changed: bool| if changed { "written" } else { "unchanged" };

    println!(
        "  {} {} pages, {} routes",
        "✓".green(),
        output.pages.len(),
        output.routes.len()
    );
    println!(
        "  {} {} ({})",
        "✓".green(),
        config.routes_file().display(),
        status(written.routes)
    );
    println!(
        "  {} {} ({})",
        "✓".green(),
        config.output_path(viper::manifest::MANIFEST_FILE).display(),
        status(written.manifest)
    );
    Ok(())
}
