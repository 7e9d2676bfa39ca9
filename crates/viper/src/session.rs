// File: src/session.rs
// Purpose: One discovery/build session over the pages directory

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use viper_router::{
    aggregate, route_table, MemberSet, MetadataProvider, PageId, PageRegistry, PageSource,
    RouteError, RouteRegistration, RoutePaths, RouteTree,
};

use crate::config::ViperConfig;
use crate::source::DiskSource;

/// A page file that could not be turned into a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub message: String,
}

/// Everything the manifest knows about one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub component: String,
    pub relative_path: String,
    pub paths: RoutePaths,
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<String>,
    /// Relative paths of the wrapping layouts, root-most first
    pub layouts: Vec<String>,
    pub name: String,
    pub middleware: Vec<String>,
    pub title: String,
    pub props: MemberSet,
    pub actions: MemberSet,
}

/// Result of one build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub tree: RouteTree,
    pub routes: Vec<RouteRegistration>,
    pub pages: Vec<PageSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Owns the registry of one build session
///
/// Files are discovered once, then kept current through `file_changed`.
/// Malformed files become diagnostics and never stop the rest of the build.
pub struct Session<S: PageSource = DiskSource> {
    config: ViperConfig,
    source: S,
    registry: PageRegistry,
    known: BTreeSet<PathBuf>,
    diagnostics: BTreeMap<PathBuf, Diagnostic>,
}

impl Session<DiskSource> {
    pub fn from_disk(config: ViperConfig) -> Self {
        Self::new(config, DiskSource)
    }
}

impl<S: PageSource> Session<S> {
    pub fn new(config: ViperConfig, source: S) -> Self {
        let registry = PageRegistry::new(config.pages_path(""), config.component_extension());
        Self {
            config,
            source,
            registry,
            known: BTreeSet::new(),
            diagnostics: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ViperConfig {
        &self.config
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access for hosts whose source is not the live filesystem
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.values().cloned().collect()
    }

    /// Lists and resolves every page and layout below the pages directory
    pub fn discover(&mut self) -> Vec<Diagnostic> {
        let root = self.config.pages_path("");
        let routes_file = self.config.routes_file();
        info!("Discovering pages in {:?}", root);

        self.known = self
            .source
            .list(&root, self.config.component_extension())
            .into_iter()
            .filter(|path| *path != routes_file)
            .collect();

        let known = &self.known;
        self.diagnostics.retain(|path, _| known.contains(path));
        self.resolve_known();
        info!(
            "Discovered {} files ({} skipped)",
            self.registry.len(),
            self.diagnostics.len()
        );
        self.diagnostics()
    }

    /// Resolves known files that are not (or no longer) registered
    fn resolve_known(&mut self) {
        let pending: Vec<PathBuf> = self
            .known
            .iter()
            .filter(|path| self.registry.lookup(path).is_none())
            .filter(|path| !self.diagnostics.contains_key(*path))
            .cloned()
            .collect();

        for path in pending {
            match self.registry.resolve(&path, &self.source) {
                Ok(_) => debug!("Resolved {:?}", path),
                Err(e) => {
                    warn!("Skipping {:?}: {}", path, e);
                    self.diagnostics.insert(
                        path.clone(),
                        Diagnostic {
                            path,
                            message: e.to_string(),
                        },
                    );
                }
            }
        }
    }

    /// Applies a created, modified or removed file or directory
    ///
    /// Adjacent server files count as changes to their page. Any other path
    /// is taken as a directory that appeared or went away, so every page
    /// known below it or now listed below it is re-derived. Returns the
    /// files whose routes were dropped and will be rebuilt.
    pub fn file_changed(&mut self, path: &Path) -> Vec<PathBuf> {
        let mut removed = match self.config.page_for_server_source(path) {
            Some(page) => self.page_changed(&page),
            None => self.directory_changed(path),
        };
        removed.sort();
        removed.dedup();

        self.resolve_known();
        removed
    }

    fn page_changed(&mut self, page: &Path) -> Vec<PathBuf> {
        if page == self.config.routes_file() || self.registry.relative_path_of(page).is_err() {
            return Vec::new();
        }

        let removed = self.registry.invalidate(page);
        for dropped in &removed {
            self.diagnostics.remove(dropped);
        }
        self.diagnostics.remove(page);

        if self.source.exists(page) {
            self.known.insert(page.to_path_buf());
        } else {
            self.known.remove(page);
        }
        debug!("Invalidated {:?} ({} routes dropped)", page, removed.len());
        removed
    }

    fn directory_changed(&mut self, dir: &Path) -> Vec<PathBuf> {
        if self.registry.relative_path_of(dir).is_err() {
            return Vec::new();
        }

        let mut affected: BTreeSet<PathBuf> = self
            .known
            .iter()
            .chain(self.diagnostics.keys())
            .filter(|path| path.starts_with(dir) && path.as_path() != dir)
            .cloned()
            .collect();
        affected.extend(self.source.list(dir, self.config.component_extension()));
        if affected.is_empty() {
            return Vec::new();
        }

        info!("Directory {:?} changed ({} files affected)", dir, affected.len());
        affected
            .iter()
            .flat_map(|page| self.page_changed(page))
            .collect()
    }

    /// Builds the route tree, server route table and page summaries
    ///
    /// # Errors
    ///
    /// Fails when two pages resolve to the same route.
    pub fn build(&mut self, metadata: &dyn MetadataProvider) -> Result<BuildOutput> {
        self.resolve_known();

        let ids: Vec<PageId> = self
            .known
            .iter()
            .filter_map(|path| self.registry.lookup(path))
            .collect();

        let target = self.config.router_target();
        let tree = RouteTree::build(&self.registry, &ids, target).map_err(collision)?;
        let routes = route_table(&self.registry, &ids, metadata).map_err(collision)?;

        let mut ordered = ids;
        viper_router::sort_by_specificity(&self.registry, &mut ordered);
        let pages = ordered
            .into_iter()
            .filter_map(|id| self.summarize(id, metadata))
            .collect::<Vec<_>>();

        info!("Built {} routes for {}", routes.len(), target);
        Ok(BuildOutput {
            tree,
            routes,
            pages,
            diagnostics: self.diagnostics(),
        })
    }

    fn summarize(&self, id: PageId, metadata: &dyn MetadataProvider) -> Option<PageSummary> {
        let node = self.registry.get(id)?;
        if node.is_layout() {
            return None;
        }
        let merged = aggregate(&self.registry, id, metadata)?;

        Some(PageSummary {
            component: node.component_name().to_string(),
            relative_path: node.relative_path().to_string(),
            paths: node.route_paths().clone(),
            parameters: node.route_parameters(),
            wildcard: node.wildcard_name().map(str::to_string),
            layouts: self
                .registry
                .chain(id)
                .iter()
                .map(|layout| layout.relative_path().to_string())
                .collect(),
            name: merged.route_name,
            middleware: merged.middleware,
            title: merged.title,
            props: merged.props,
            actions: merged.actions,
        })
    }
}

fn collision(err: RouteError) -> anyhow::Error {
    anyhow::Error::new(err).context("Route collision")
}

/// Discover and build in one go, reading `metadata` from the output directory
pub fn build_project(config: &ViperConfig) -> Result<BuildOutput> {
    let metadata = crate::metadata::JsonMetadata::load(
        config.output_path(crate::metadata::METADATA_FILE),
    )
    .context("Failed to load page metadata")?;

    let mut session = Session::from_disk(config.clone());
    session.discover();
    session.build(&metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viper_router::{MemorySource, StaticMetadata};

    fn session(files: &[&str]) -> Session<MemorySource> {
        let config = ViperConfig::default().with_root("/app");
        let source = MemorySource::from_files(files.iter().map(|f| config.pages_path(f)));
        Session::new(config, source)
    }

    #[test]
    fn test_malformed_file_is_isolated() {
        let mut session = session(&["index.vue", "[].vue", "about.vue"]);
        let diagnostics = session.discover();

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].path.ends_with("[].vue"));
        assert!(diagnostics[0].message.contains("malformed"));

        let output = session.build(&StaticMetadata::new()).unwrap();
        assert_eq!(output.routes.len(), 2);
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_collision_is_fatal() {
        let mut session = session(&["about.vue", "about/index.vue"]);
        session.discover();
        let err = session.build(&StaticMetadata::new()).unwrap_err();
        assert!(err.to_string().contains("Route collision"));
    }

    #[test]
    fn test_routes_file_is_not_a_page() {
        let mut react = ViperConfig::default().with_root("/app");
        react.framework = crate::config::Framework::React;
        let source = MemorySource::from_files([react.pages_path("index.tsx"), react.routes_file()]);
        let mut session = Session::new(react, source);
        session.discover();
        assert_eq!(session.registry().len(), 1);
    }

    #[test]
    fn test_new_layout_rewraps_pages() {
        let mut session = session(&["blog/post.vue"]);
        session.discover();
        let before = session.build(&StaticMetadata::new()).unwrap();
        assert!(before.pages[0].layouts.is_empty());

        let layout = session.config().pages_path("blog/_layout.vue");
        session.source_mut().insert(layout.clone());
        let dropped = session.file_changed(&layout);
        assert_eq!(dropped, vec![session.config().pages_path("blog/post.vue")]);

        let after = session.build(&StaticMetadata::new()).unwrap();
        assert_eq!(after.pages[0].layouts, vec!["blog/_layout.vue"]);
    }

    #[test]
    fn test_removed_page_leaves_build() {
        let mut session = session(&["a.vue", "b.vue"]);
        session.discover();

        let b = session.config().pages_path("b.vue");
        session.source_mut().remove(&b);
        session.file_changed(&b);

        let output = session.build(&StaticMetadata::new()).unwrap();
        let paths: Vec<&str> = output.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a"]);
    }

    #[test]
    fn test_fixed_file_clears_diagnostic() {
        let mut session = session(&["[].vue"]);
        session.discover();
        assert_eq!(session.diagnostics().len(), 1);

        let broken = session.config().pages_path("[].vue");
        let fixed = session.config().pages_path("[id].vue");
        session.source_mut().remove(&broken);
        session.source_mut().insert(fixed.clone());
        session.file_changed(&broken);
        session.file_changed(&fixed);

        assert!(session.diagnostics().is_empty());
        let output = session.build(&StaticMetadata::new()).unwrap();
        assert_eq!(output.routes[0].path, "{id}");
    }

    #[test]
    fn test_moved_directory_is_re_derived() {
        let mut session = session(&["a.vue", "blog/_layout.vue", "blog/post.vue", "blog/[].vue"]);
        session.discover();
        assert_eq!(session.diagnostics().len(), 1);

        // blog/ renamed to news/: the watcher reports both directories only
        let blog = session.config().pages_path("blog");
        let news = session.config().pages_path("news");
        for file in ["_layout.vue", "post.vue", "[].vue"] {
            session.source_mut().remove(&blog.join(file));
            session.source_mut().insert(news.join(file));
        }

        let dropped = session.file_changed(&blog);
        assert_eq!(dropped, vec![blog.join("_layout.vue"), blog.join("post.vue")]);
        assert!(session.file_changed(&news).is_empty());

        let output = session.build(&StaticMetadata::new()).unwrap();
        let paths: Vec<&str> = output.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "news/post"]);
        assert_eq!(output.pages[1].layouts, vec!["news/_layout.vue"]);
        assert_eq!(output.diagnostics.len(), 1);
        assert!(output.diagnostics[0].path.starts_with(&news));
    }

    #[test]
    fn test_deleted_directory_drops_its_pages() {
        let mut session = session(&["a.vue", "blog/post.vue"]);
        session.discover();

        let blog = session.config().pages_path("blog");
        session.source_mut().remove(&blog.join("post.vue"));
        session.file_changed(&blog);

        let output = session.build(&StaticMetadata::new()).unwrap();
        let paths: Vec<&str> = output.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a"]);
    }

    #[test]
    fn test_rediscovery_forgets_vanished_files() {
        let mut session = session(&["index.vue", "[].vue"]);
        assert_eq!(session.discover().len(), 1);

        let broken = session.config().pages_path("[].vue");
        session.source_mut().remove(&broken);
        assert!(session.discover().is_empty());
    }

    #[test]
    fn test_parameter_names_collide() {
        let mut session = session(&["posts/[id].vue", "posts/[slug].vue"]);
        session.discover();
        let err = session.build(&StaticMetadata::new()).unwrap_err();
        assert!(err.to_string().contains("Route collision"));
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let mut session = session(&["a.vue"]);
        session.discover();
        assert!(session.file_changed(Path::new("/app/resources/js/pages/a.php")).is_empty());
        assert!(session.file_changed(Path::new("/elsewhere/x.vue")).is_empty());
    }
}
