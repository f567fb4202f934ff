pub mod library;
pub mod new;
pub mod seo;
pub mod style;
pub mod tree;

pub use library::{library, LibraryArgs};
pub use new::{new_page, NewArgs};
pub use seo::{seo, SeoArgs};
pub use style::{style, StyleArgs};
pub use tree::{tree, TreeArgs};

use crate::config::Config;
use ienet_editor::JsonFileStore;
use std::path::PathBuf;

/// Resolved settings shared by every command
#[derive(Debug)]
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
    pub store: JsonFileStore,
}
