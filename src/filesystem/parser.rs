use std::path::PathBuf;

use tracing::debug;

use super::Item;

/// Four-character groups that each count as one level of nesting.
const INDENT_UNITS: [&str; 7] = ["    ", "│   ", "├── ", "└── ", "|   ", "|-- ", "`-- "];

/// Branch connectors that may precede a name once the indent units run out.
const CONNECTORS: [&str; 4] = ["├──", "└──", "|--", "`--"];

/// Parses an indented tree description into items, in the order they were
/// written.
///
/// Each non-blank line is one entry. Its depth is the number of leading
/// indent units (four spaces, or one of the `tree`-style drawing groups such
/// as `│   ` or `├── `). A trailing `/` marks a directory. A line may never
/// nest more than one level below the last directory seen; deeper
/// indentation is clamped rather than rejected, so this never fails.
pub fn parse_tree(text: &str) -> Vec<Item> {
    let mut parent_stack: Vec<String> = Vec::new();
    let mut items = Vec::new();

    for line in text.lines() {
        let Some((depth, name, is_dir)) = parse_line(line) else {
            continue;
        };

        let depth = depth.min(parent_stack.len());
        parent_stack.truncate(depth);

        let path: PathBuf = parent_stack
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(name))
            .collect();
        let item = if is_dir { Item::dir(path) } else { Item::file(path) };
        debug!("Parsed '{item}' at depth {depth}");
        items.push(item);

        if is_dir {
            parent_stack.push(name.to_string());
        }
    }

    items
}

/// Splits one line into its literal depth, name and directory flag.
/// Returns `None` for lines that carry no name.
fn parse_line(line: &str) -> Option<(usize, &str, bool)> {
    if line.trim().is_empty() {
        return None;
    }

    let (depth, rest) = count_indent_units(line);

    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '│' || c == '|');
    let rest = CONNECTORS
        .iter()
        .find_map(|connector| rest.strip_prefix(connector))
        .unwrap_or(rest);
    let name = rest.trim();

    let (name, is_dir) = match name.strip_suffix('/') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (name, false),
    };

    if name.is_empty() {
        return None;
    }

    Some((depth, name, is_dir))
}

fn count_indent_units(line: &str) -> (usize, &str) {
    let mut depth = 0;
    let mut rest = line;
    while let Some(stripped) = INDENT_UNITS
        .iter()
        .find_map(|unit| rest.strip_prefix(unit))
    {
        depth += 1;
        rest = stripped;
    }
    (depth, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn path(segments: &[&str]) -> PathBuf {
        segments.iter().collect()
    }

    #[test]
    fn nests_children_under_their_directory() {
        let items = parse_tree("a/\n    b.txt\n");
        assert_eq!(items, vec![Item::dir("a"), Item::file(path(&["a", "b.txt"]))]);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let with_blank = parse_tree("a/\n\n    b.txt\n");
        let without_blank = parse_tree("a/\n    b.txt\n");
        assert_eq!(with_blank, without_blank);
    }

    #[test]
    fn whitespace_only_lines_do_not_reset_the_parent_stack() {
        let items = parse_tree("a/\n    b/\n   \t \n        c.txt\n");
        assert_eq!(items.last(), Some(&Item::file(path(&["a", "b", "c.txt"]))));
    }

    #[test]
    fn over_indentation_is_clamped() {
        let items = parse_tree("a/\n        b.txt\n");
        assert_eq!(items, vec![Item::dir("a"), Item::file(path(&["a", "b.txt"]))]);
    }

    #[test]
    fn over_indentation_without_any_parent_stays_at_root() {
        let items = parse_tree("            lonely.txt\n");
        assert_eq!(items, vec![Item::file("lonely.txt")]);
    }

    #[rstest]
    #[case("x/", Item::dir("x"))]
    #[case("x", Item::file("x"))]
    #[case("  x/  ", Item::dir("x"))]
    #[case("Cargo.toml", Item::file("Cargo.toml"))]
    fn trailing_slash_decides_directory(#[case] input: &str, #[case] expected: Item) {
        assert_eq!(parse_tree(input), vec![expected]);
    }

    #[test]
    fn dedent_discards_deeper_ancestors() {
        let items = parse_tree("a/\n    b/\n    c/\n");
        assert_eq!(
            items,
            vec![
                Item::dir("a"),
                Item::dir(path(&["a", "b"])),
                Item::dir(path(&["a", "c"])),
            ]
        );
    }

    #[test]
    fn dedent_back_to_root() {
        let items = parse_tree("a/\n    b/\n        c.txt\nd.txt\n");
        assert_eq!(items.last(), Some(&Item::file("d.txt")));
    }

    #[rstest]
    #[case("")]
    #[case("\n\n")]
    #[case("   \n\t\n")]
    #[case("│\n│   \n")]
    #[case("/\n")]
    fn inputs_without_names_produce_nothing(#[case] input: &str) {
        assert!(parse_tree(input).is_empty());
    }

    #[test]
    fn files_do_not_become_parents() {
        let items = parse_tree("a.txt\n    b.txt\n");
        assert_eq!(items, vec![Item::file("a.txt"), Item::file("b.txt")]);
    }

    #[test]
    fn output_keeps_authored_order() {
        let items = parse_tree("z/\n    b\n    a\ny\n");
        let paths: Vec<PathBuf> = items.into_iter().map(|item| item.path).collect();
        assert_eq!(
            paths,
            vec![
                path(&["z"]),
                path(&["z", "b"]),
                path(&["z", "a"]),
                path(&["y"]),
            ]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let items = parse_tree("a/\n    f\n    f\n");
        assert_eq!(items.len(), 3);
        assert_eq!(items[1], items[2]);
    }

    #[test]
    fn understands_box_drawing_trees() {
        let text = "\
route_web/
├── manifest.sii
├── def/
│   └── gui/
│       └── route_web.desc
├── lua/
│   └── route_web.lua
└── web_server/
    ├── package.json
    └── public/
        └── index.html
";
        let items = parse_tree(text);
        assert_eq!(
            items,
            vec![
                Item::dir("route_web"),
                Item::file(path(&["route_web", "manifest.sii"])),
                Item::dir(path(&["route_web", "def"])),
                Item::dir(path(&["route_web", "def", "gui"])),
                Item::file(path(&["route_web", "def", "gui", "route_web.desc"])),
                Item::dir(path(&["route_web", "lua"])),
                Item::file(path(&["route_web", "lua", "route_web.lua"])),
                Item::dir(path(&["route_web", "web_server"])),
                Item::file(path(&["route_web", "web_server", "package.json"])),
                Item::dir(path(&["route_web", "web_server", "public"])),
                Item::file(path(&["route_web", "web_server", "public", "index.html"])),
            ]
        );
    }

    #[test]
    fn understands_ascii_tree_output() {
        let text = "project/\n|-- src/\n|   `-- main.rs\n`-- Cargo.toml\n";
        let items = parse_tree(text);
        assert_eq!(
            items,
            vec![
                Item::dir("project"),
                Item::dir(path(&["project", "src"])),
                Item::file(path(&["project", "src", "main.rs"])),
                Item::file(path(&["project", "Cargo.toml"])),
            ]
        );
    }

    #[test]
    fn connector_without_trailing_space_is_stripped_from_name() {
        let items = parse_tree("a/\n    ├──b.txt\n");
        assert_eq!(items[1], Item::file(path(&["a", "b.txt"])));
    }

    #[test]
    fn windows_line_endings() {
        let items = parse_tree("a/\r\n    b.txt\r\n");
        assert_eq!(items, vec![Item::dir("a"), Item::file(path(&["a", "b.txt"]))]);
    }

    #[test]
    fn parent_stack_tracks_last_directory_depth() {
        // `c` sits under `b` even though `x.txt` was emitted in between.
        let items = parse_tree("a/\n    b/\n        x.txt\n        c/\n            d\n");
        assert_eq!(items[4], Item::file(path(&["a", "b", "c", "d"])));
    }
}
