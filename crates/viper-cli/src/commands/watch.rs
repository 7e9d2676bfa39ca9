use anyhow::Result;
use colored::Colorize;
use notify::RecursiveMode;
use std::path::{Path, PathBuf};
use viper::metadata::METADATA_FILE;
use viper::{JsonMetadata, Session, ViperConfig};

use super::build::report;
use crate::watcher::PageWatcher;

pub fn execute(config: &ViperConfig) -> Result<()> {
    println!("{}", "Watching pages...".green().bold());
    println!();

    let mut session = Session::from_disk(config.clone());
    session.discover();
    rebuild(&mut session);

    let watcher = PageWatcher::new(vec![
        (config.pages_path(""), RecursiveMode::Recursive),
        (config.output_path(""), RecursiveMode::NonRecursive),
    ])?;
    let metadata_file = config.output_path(METADATA_FILE);

    // One batch at a time: every change is applied before the next build
    while let Some(batch) = watcher.next_batch() {
        let relevant: Vec<PathBuf> = batch
            .into_iter()
            .filter(|path| path == &metadata_file || is_page_change(config, path))
            .collect();
        if relevant.is_empty() {
            continue;
        }

        for path in &relevant {
            println!("{} Changed: {}", "🔄".yellow(), path.display());
            if path != &metadata_file {
                session.file_changed(path);
            }
        }
        rebuild(&mut session);
    }

    Ok(())
}

fn is_page_change(config: &ViperConfig, path: &Path) -> bool {
    match config.page_for_server_source(path) {
        Some(page) => page != config.routes_file(),
        // a moved or deleted directory arrives as one event for the directory
        None => {
            path.starts_with(config.pages_path(""))
                && (path.is_dir() || path.extension().is_none())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_events_are_page_changes() {
        let config = ViperConfig::default().with_root("/app");
        assert!(is_page_change(&config, &config.pages_path("blog")));
        assert!(is_page_change(&config, &config.pages_path("blog/post.vue")));
        assert!(!is_page_change(&config, &config.pages_path("routes.ts")));
        assert!(!is_page_change(&config, Path::new("/app/storage/logs")));
    }
}

/// Builds and writes outputs; failures are printed, never fatal while watching
fn rebuild(session: &mut Session) {
    let config = session.config().clone();
    let result = JsonMetadata::load(config.output_path(METADATA_FILE))
        .and_then(|metadata| session.build(&metadata))
        .and_then(|output| report(&config, &output));

    match result {
        Ok(()) => println!("{} Routes up to date", "✓".green()),
        Err(e) => eprintln!("{} Build failed: {:#}", "❌".red(), e),
    }
}
