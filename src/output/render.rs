use std::fmt::Write as _;

use colored::Colorize;
use supports_color::Stream;

use crate::filesystem::{DirectoryNode, FileEntry};

/// Whether stdout can show colors
pub fn stdout_supports_color() -> bool {
    supports_color::on(Stream::Stdout).is_some()
}

enum Entry<'a> {
    Directory(&'a DirectoryNode),
    File(&'a FileEntry),
}

struct Pending<'a> {
    entry: Entry<'a>,
    prefix: String,
    last: bool,
}

/// Renders `tree` as an indented listing, directories before files.
/// Directory names end with `/`, files show their size when known.
pub fn render_tree(tree: &DirectoryNode, use_color: bool) -> String {
    let mut output = String::new();
    let root_name = if tree.name().is_empty() {
        ".".to_string()
    } else {
        format!("{}/", tree.name())
    };
    let _ = writeln!(output, "{}", paint_directory(&root_name, use_color));

    let mut stack = Vec::new();
    push_children(&mut stack, tree, String::new());

    while let Some(Pending {
        entry,
        prefix,
        last,
    }) = stack.pop()
    {
        let branch = if last { "└── " } else { "├── " };
        match entry {
            Entry::Directory(directory) => {
                let name = format!("{}/", directory.name());
                let _ = writeln!(
                    output,
                    "{prefix}{branch}{}",
                    paint_directory(&name, use_color)
                );
                let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
                push_children(&mut stack, directory, child_prefix);
            }
            Entry::File(file) => {
                let size = file
                    .size()
                    .map(|size| format!(" ({size} B)"))
                    .unwrap_or_default();
                let _ = writeln!(output, "{prefix}{branch}{}{size}", file.name());
            }
        }
    }

    output
}

/// Pushes the children of `node` so that they pop in display order
fn push_children<'a>(stack: &mut Vec<Pending<'a>>, node: &'a DirectoryNode, prefix: String) {
    let entries: Vec<Entry<'a>> = node
        .directories()
        .map(Entry::Directory)
        .chain(node.files().map(Entry::File))
        .collect();
    let count = entries.len();

    for (index, entry) in entries.into_iter().enumerate().rev() {
        stack.push(Pending {
            entry,
            prefix: prefix.clone(),
            last: index + 1 == count,
        });
    }
}

fn paint_directory(name: &str, use_color: bool) -> String {
    if use_color {
        name.blue().bold().to_string()
    } else {
        name.to_string()
    }
}
