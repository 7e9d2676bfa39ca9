use anyhow::Result;
use colored::Colorize;
use viper::{build_project, ViperConfig};
use viper_router::RouterTarget;

pub fn execute(config: &ViperConfig, target: RouterTarget) -> Result<()> {
    let output = build_project(config)?;

    match target {
        RouterTarget::Laravel => {
            for route in &output.routes {
                let name = if route.name.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", route.name)
                };
                let middleware = if route.middleware.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", route.middleware.join(", "))
                };
                println!(
                    "{} {}{}{} → {}",
                    route.methods.join("|").dimmed(),
                    route.path.cyan(),
                    name.green(),
                    middleware.yellow(),
                    route.component
                );
            }
        }
        RouterTarget::Vue | RouterTarget::React => {
            for page in &output.pages {
                println!(
                    "{} → {}",
                    page.paths.get(target).cyan(),
                    page.component
                );
            }
        }
    }

    for diagnostic in &output.diagnostics {
        eprintln!(
            "{} {}: {}",
            "⚠".yellow(),
            diagnostic.path.display(),
            diagnostic.message
        );
    }
    Ok(())
}
