//! Breadth-first view lookup.

use crate::registry::EngineRegistry;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A parsed view name: optional directory suffix plus the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewName<'a> {
    dir: Option<&'a str>,
    leaf: &'a str,
}

impl<'a> ViewName<'a> {
    fn parse(name: &'a str) -> Self {
        let name = name.trim_matches('/');
        match name.rsplit_once('/') {
            Some((dir, leaf)) => Self {
                dir: Some(dir),
                leaf,
            },
            None => Self {
                dir: None,
                leaf: name,
            },
        }
    }

    fn in_dir(&self, parent: &Path) -> bool {
        match self.dir {
            Some(dir) => parent.ends_with(dir),
            None => true,
        }
    }
}

/// Search `roots` in order for the view file named `name`.
///
/// Each root is walked breadth-first. At every directory level the files
/// are tried for `<name>.vue.<engine>` first (any registered engine when
/// `engine` is `None`), then `<name>.vue`, then `<name>` itself, before any
/// subdirectory is entered.
pub fn find_template(
    roots: &[PathBuf],
    name: &str,
    engine: Option<&str>,
    registry: &EngineRegistry,
) -> Option<PathBuf> {
    let view = ViewName::parse(name);
    if view.leaf.is_empty() {
        return None;
    }

    roots
        .iter()
        .find_map(|root| search_root(root, &view, engine, registry))
}

fn search_root(
    root: &Path,
    view: &ViewName<'_>,
    engine: Option<&str>,
    registry: &EngineRegistry,
) -> Option<PathBuf> {
    let mut queue = VecDeque::from([root.to_path_buf()]);

    while let Some(dir) = queue.pop_front() {
        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if entry.file_type().is_dir() {
                queue.push_back(entry.into_path());
            } else {
                files.push(entry.into_path());
            }
        }

        if !view.in_dir(&dir) {
            continue;
        }
        if let Some(found) = pick(&files, view, engine, registry) {
            tracing::trace!(path = %found.display(), "view found");
            return Some(found);
        }
    }

    None
}

fn pick(
    files: &[PathBuf],
    view: &ViewName<'_>,
    engine: Option<&str>,
    registry: &EngineRegistry,
) -> Option<PathBuf> {
    let engine_file = |path: &&PathBuf| {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let Some(ext) = file_name
            .strip_prefix(view.leaf)
            .and_then(|rest| rest.strip_prefix(".vue."))
        else {
            return false;
        };
        match engine {
            Some(tag) => ext == tag.trim_start_matches('.'),
            None => registry.contains(ext),
        }
    };
    let vue_file = format!("{}.vue", view.leaf);

    files
        .iter()
        .find(engine_file)
        .or_else(|| files.iter().find(|p| file_name_is(p, &vue_file)))
        .or_else(|| files.iter().find(|p| file_name_is(p, view.leaf)))
        .cloned()
}

fn file_name_is(path: &Path, expected: &str) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(expected)
}
