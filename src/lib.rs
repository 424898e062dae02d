pub mod archive;
pub mod cli;
pub mod font;
pub mod fs_op;
pub mod logging;
pub mod relative_time;
pub mod settings;

pub use crate::archive::{ArchiveBuilder, ArchiveError, ArchiveOptions};
pub use crate::font::{is_real_otf, is_real_ttf, FontKind};
pub use crate::fs_op::{
    copy_path, move_path, remove_path, rename_path, resolve_name, write_to_file, FsOpError,
    WriteMode,
};
pub use crate::relative_time::{to_relative_time, to_relative_time_at};
pub use crate::settings::Settings;
