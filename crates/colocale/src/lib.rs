#![doc = include_str!("../README.md")]

pub mod assemble;
pub mod error;
pub mod extract;
pub mod fragment;
pub mod load;
pub mod model;
pub mod render;
pub mod shape;
pub mod split;
pub mod walk;

pub use colocale_toml::TranslationsFormat;
pub use error::{BoxError, ColocaleError};
pub use extract::{ExtractOptions, extract_translations, read_catalog};
pub use fragment::ScriptLoader;
pub use load::{
    CollectedCatalog, LoadOptions, collect_catalog, current_locale_tree, load_translations,
    write_catalog,
};
pub use model::{Catalog, Fragment, FragmentMessages, MessageNode, MessageTree};
pub use split::{ExtractReport, FileDiff, WriteMode};
