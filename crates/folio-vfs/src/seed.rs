//! Built-in filesystem content.
//!
//! The root holds `README.md`, two project write-ups under `projekte/`, and
//! one file per press article under `presse/`. This tree is composed once,
//! when a session starts without a persisted filesystem.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::node::{FsNode, FsTree};

/// A press mention, as supplied by the site's press data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressArticle {
    pub title: String,
    pub source: String,
    pub url: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

const README: &str = "\
Welcome to my portfolio terminal!

This is a small simulated shell. Nothing here touches a real disk:
files live in your browser storage and survive page reloads.

Try:
  ls            list this folder
  cd projekte   look at some projects
  cat <file>    read a file
  help          show every command
";

const PROJECTS: [(&str, &str); 2] = [
    (
        "portfolio-website.md",
        "\
# Portfolio Website

Personal site with projects, blog, resume, gallery and press pages.
Includes this terminal, a handful of generative widgets and an
achievement system that rewards curious visitors.
",
    ),
    (
        "terminal-emulator.md",
        "\
# Terminal Emulator

A cosmetic shell with a virtual filesystem, a nano-style editor,
a number guessing game, a typing test and a matrix screensaver.
All state is kept on the client.
",
    ),
];

/// Fallback press list used when no external data file is configured.
pub fn default_press_articles() -> Vec<PressArticle> {
    vec![
        PressArticle {
            title: "Student builds a terminal into a portfolio".to_string(),
            source: "Campus Daily".to_string(),
            url: "https://example.com/campus-daily/terminal-portfolio".to_string(),
            date: "2024-03-12".to_string(),
            description: "A look at a personal website that hides a playable shell.".to_string(),
        },
        PressArticle {
            title: "Ten developer portfolios worth a visit".to_string(),
            source: "Web Weekly".to_string(),
            url: "https://example.com/web-weekly/portfolios".to_string(),
            date: "2024-09-01".to_string(),
            description: "Our favourite creative takes on the classic portfolio.".to_string(),
        },
    ]
}

/// Build the initial tree for a new session.
pub fn seed_tree(articles: &[PressArticle]) -> FsTree {
    let mut root = BTreeMap::new();
    root.insert("README.md".to_string(), file(README));

    let projects = PROJECTS
        .iter()
        .map(|(name, body)| (name.to_string(), file(body)))
        .collect();
    root.insert("projekte".to_string(), Rc::new(FsNode::Directory(projects)));

    let mut press = BTreeMap::new();
    for (index, article) in articles.iter().enumerate() {
        let name = unique_name(&press, &article_file_name(article, index));
        press.insert(name, file(&render_article(article)));
    }
    root.insert("presse".to_string(), Rc::new(FsNode::Directory(press)));

    // The seed only contains well-formed names, so validation cannot fail.
    FsTree::from_root(FsNode::Directory(root)).unwrap_or_default()
}

fn file(content: &str) -> Rc<FsNode> {
    Rc::new(FsNode::File(content.to_string()))
}

/// Lower-case slug of the title, e.g. `ten-developer-portfolios.md`.
fn article_file_name(article: &PressArticle, index: usize) -> String {
    let mut slug = String::with_capacity(article.title.len());
    let mut pending_dash = false;
    for ch in article.title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug = format!("artikel-{}", index + 1);
    }
    format!("{slug}.md")
}

fn unique_name(existing: &BTreeMap<String, Rc<FsNode>>, candidate: &str) -> String {
    if !existing.contains_key(candidate) {
        return candidate.to_string();
    }
    let stem = candidate.strip_suffix(".md").unwrap_or(candidate);
    (2..)
        .map(|n| format!("{stem}-{n}.md"))
        .find(|name| !existing.contains_key(name))
        .unwrap_or_else(|| candidate.to_string())
}

fn render_article(article: &PressArticle) -> String {
    let mut out = format!(
        "# {}\n\nSource: {}\nDate:   {}\nLink:   {}\n",
        article.title, article.source, article.date, article.url
    );
    if !article.description.is_empty() {
        out.push('\n');
        out.push_str(&article.description);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> PressArticle {
        PressArticle {
            title: title.to_string(),
            source: "Source".to_string(),
            url: "https://example.com".to_string(),
            date: "2024-01-01".to_string(),
            description: String::new(),
        }
    }

    fn root_names(tree: &FsTree) -> Vec<String> {
        tree.list(&[]).unwrap().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn root_layout() {
        let tree = seed_tree(&default_press_articles());
        assert_eq!(root_names(&tree), vec!["README.md", "presse", "projekte"]);
        assert!(tree.is_dir(&["presse"]));
        assert!(tree.is_dir(&["projekte"]));
    }

    #[test]
    fn two_projects() {
        let tree = seed_tree(&[]);
        let projects = tree.list(&["projekte".to_string()]).unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects.iter().all(|e| !e.is_dir));
    }

    #[test]
    fn one_file_per_article() {
        let articles = default_press_articles();
        let tree = seed_tree(&articles);
        let press = tree.list(&["presse".to_string()]).unwrap();
        assert_eq!(press.len(), articles.len());
    }

    #[test]
    fn no_articles_gives_empty_press_folder() {
        let tree = seed_tree(&[]);
        assert!(tree.list(&["presse".to_string()]).unwrap().is_empty());
    }

    #[test]
    fn article_file_contains_fields() {
        let mut a = article("Hello, World!");
        a.description = "Short blurb".to_string();
        let tree = seed_tree(&[a]);
        let body = tree
            .read(&["presse".to_string(), "hello-world.md".to_string()])
            .unwrap();
        assert!(body.starts_with("# Hello, World!"));
        assert!(body.contains("Source: Source"));
        assert!(body.contains("https://example.com"));
        assert!(body.contains("Short blurb"));
    }

    #[test]
    fn duplicate_titles_get_suffix() {
        let tree = seed_tree(&[article("Same"), article("same"), article("SAME")]);
        let names: Vec<String> = tree
            .list(&["presse".to_string()])
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["same-2.md", "same-3.md", "same.md"]);
    }

    #[test]
    fn unusable_title_falls_back_to_index() {
        let tree = seed_tree(&[article("!!!")]);
        assert!(
            tree.lookup(&["presse", "artikel-1.md"])
                .is_some_and(|n| !n.is_dir())
        );
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(
            article_file_name(&article("  Rust -- in the   browser? "), 0),
            "rust-in-the-browser.md"
        );
    }

    #[test]
    fn press_article_deserializes_without_description() {
        let a: PressArticle = serde_json::from_str(
            r#"{"title":"t","source":"s","url":"u","date":"d"}"#,
        )
        .unwrap();
        assert!(a.description.is_empty());
    }
}
