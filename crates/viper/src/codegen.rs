// File: src/codegen.rs
// Purpose: Router configuration modules generated from the route tree

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use viper_router::{RouteTree, RouteTreeNode, RouterTarget};

use crate::config::{Framework, ViperConfig};
use crate::session::{BuildOutput, PageSummary};

/// Renders the router module for the configured framework
pub fn render(config: &ViperConfig, output: &BuildOutput) -> String {
    match config.framework {
        Framework::Vue => render_vue(&output.tree, &output.pages),
        Framework::React => render_react(&output.tree),
    }
}

/// Writes the router module next to the pages; returns whether the file changed
pub fn generate(config: &ViperConfig, output: &BuildOutput) -> Result<bool> {
    write_if_changed(&config.routes_file(), &render(config, output))
}

/// Writes `contents` unless the file already holds exactly that
///
/// Leaving unchanged files alone keeps bundler watchers quiet.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if let Ok(previous) = fs::read_to_string(path) {
        if previous == contents {
            debug!("Unchanged: {:?}", path);
            return Ok(false);
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write file: {:?}", path))?;
    info!("Wrote {:?}", path);
    Ok(true)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

// ============================================================================
// Vue Router
// ============================================================================

pub fn render_vue(tree: &RouteTree, pages: &[PageSummary]) -> String {
    let mut out = String::new();
    out.push_str("import { createRouter, createWebHistory } from 'vue-router'\n");
    out.push_str("import type { RouteRecordInfo, RouteRecordRaw } from 'vue-router'\n\n");

    out.push_str("export interface RouteNamedMap {\n");
    for page in pages {
        out.push_str(&format!(
            "  {name}: RouteRecordInfo<{name}, {path}, {raw}, {normalized}, never>\n",
            name = quote(&page.component),
            path = quote(&absolute(page.paths.get(RouterTarget::Vue))),
            raw = vue_params(page, "string | string[]"),
            normalized = vue_params(page, "string[]"),
        ));
    }
    out.push_str("}\n\n");

    out.push_str("export const routes: RouteRecordRaw[] = [\n");
    for node in tree.routes() {
        vue_route(node, 1, true, &mut out);
    }
    out.push_str("]\n\n");

    out.push_str("export const router = createRouter({\n");
    out.push_str("  history: createWebHistory(),\n");
    out.push_str("  routes,\n");
    out.push_str("})\n\n");

    out.push_str("declare module 'vue-router' {\n");
    out.push_str("  interface TypesConfig {\n");
    out.push_str("    RouteNamedMap: RouteNamedMap\n");
    out.push_str("  }\n");
    out.push_str("}\n");
    out
}

/// Parameter object type; the catch-all parameter is repeatable
fn vue_params(page: &PageSummary, repeated: &str) -> String {
    if page.parameters.is_empty() {
        return "Record<never, never>".to_string();
    }

    let fields: Vec<String> = page
        .parameters
        .iter()
        .map(|param| {
            let ty = if page.wildcard.as_deref() == Some(param.as_str()) {
                repeated
            } else {
                "string"
            };
            format!("{}: {}", quote(param), ty)
        })
        .collect();
    format!("{{ {} }}", fields.join(", "))
}

fn absolute(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn vue_route(node: &RouteTreeNode, depth: usize, top_level: bool, out: &mut String) {
    let pad = indent(depth);
    // top-level records must be absolute
    let path = if top_level {
        absolute(&node.path)
    } else {
        node.path.clone()
    };

    out.push_str(&format!("{}{{\n", pad));
    out.push_str(&format!("{}  path: {},\n", pad, quote(&path)));
    if !node.is_layout {
        out.push_str(&format!("{}  name: {},\n", pad, quote(&node.component)));
    }
    out.push_str(&format!(
        "{}  component: () => import({}),\n",
        pad,
        quote(&format!("./{}", node.relative_file))
    ));
    if !node.children.is_empty() {
        out.push_str(&format!("{}  children: [\n", pad));
        for child in &node.children {
            vue_route(child, depth + 2, false, out);
        }
        out.push_str(&format!("{}  ],\n", pad));
    }
    out.push_str(&format!("{}}},\n", pad));
}

// ============================================================================
// React Router
// ============================================================================

pub fn render_react(tree: &RouteTree) -> String {
    let mut out = String::new();
    out.push_str("import { createBrowserRouter } from 'react-router'\n");
    out.push_str("import type { RouteObject } from 'react-router'\n\n");

    out.push_str("export const routes: RouteObject[] = [\n");
    for node in tree.routes() {
        react_route(node, 1, &mut out);
    }
    out.push_str("]\n\n");

    out.push_str("export const router = createBrowserRouter(routes)\n");
    out
}

fn react_route(node: &RouteTreeNode, depth: usize, out: &mut String) {
    let pad = indent(depth);

    out.push_str(&format!("{}{{\n", pad));
    if node.index {
        out.push_str(&format!("{}  index: true,\n", pad));
    } else if !node.path.is_empty() {
        out.push_str(&format!("{}  path: {},\n", pad, quote(&node.path)));
    }
    out.push_str(&format!(
        "{}  lazy: async () => ({{ Component: (await import({})).default }}),\n",
        pad,
        quote(&format!("./{}", node.relative_file))
    ));
    if !node.children.is_empty() {
        out.push_str(&format!("{}  children: [\n", pad));
        for child in &node.children {
            react_route(child, depth + 2, out);
        }
        out.push_str(&format!("{}  ],\n", pad));
    }
    out.push_str(&format!("{}}},\n", pad));
}
