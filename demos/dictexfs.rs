//! A static tree served by `DictFs`.
//!
//! Builds a small nested tree of files and a symlink, then walks it the way
//! a transport would: `metadata` on every path, `read_dir` on directories,
//! `read_range` on files, `read_link` on symlinks.
//!
//! Run with: `RUST_LOG=routefs=trace cargo run --example dictexfs`

use routefs::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// =============================================================================
// Step 1: Describe the tree
// =============================================================================

fn tree() -> Node {
    Node::dir([
        ("Hello", Node::file("World")),
        (
            "Directory",
            Node::dir([
                ("a", Node::file("a")),
                ("b", Node::file("b")),
                ("c", Node::symlink("a")),
            ]),
        ),
    ])
}

// =============================================================================
// Step 2: Walk any filesystem
// =============================================================================

/// Print every entry below `path`, depth first.
fn walk(fs: &dyn Fs, path: &Path, depth: usize) -> Result<(), FsError> {
    let indent = "  ".repeat(depth);
    let meta = fs.metadata(path)?;
    let name = path
        .file_name()
        .map_or_else(|| "/".to_string(), |n| n.to_string_lossy().into_owned());

    match meta.file_type {
        FileType::File => {
            let content = fs.read_to_string(path)?;
            println!("{indent}{name} ({:o}, {} bytes): {content:?}", meta.mode(), meta.size);
        }
        FileType::Symlink => {
            println!("{indent}{name} -> {}", fs.read_link(path)?);
        }
        FileType::Directory => {
            println!("{indent}{name}/ ({:o})", meta.mode());
            for member in fs.list(path)? {
                let child: PathBuf = path.join(member);
                walk(fs, &child, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), FsError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fs = DictFs::build(tree())?;
    walk(&fs, Path::new("/"), 0)?;

    // Anything outside the tree is simply not there.
    if let Err(err) = fs.metadata(Path::new("/Directory/d")) {
        println!("/Directory/d: {err} (errno {})", err.errno());
    }
    Ok(())
}
