//! Indented ASCII trees and the filesystem layouts they describe.
//!
//! Text is parsed into an ordered list of [`Item`]s, which can then be
//! materialized under a destination directory or folded into a
//! [`FilesystemNode`] for previewing.

mod item;
mod materializer;
mod parser;
mod tree;

pub use item::Item;
pub use materializer::{MaterializeError, materialize};
pub use parser::parse_tree;
pub use tree::FilesystemNode;

/// Sample input shown by `tree example`.
pub const EXAMPLE_TREE: &str = "\
route_web/
├── manifest.sii
├── def/
│   └── gui/
│       └── route_web.desc
├── lua/
│   └── route_web.lua
└── web_server/
    ├── package.json
    ├── index.js
    └── public/
        └── index.html
";
