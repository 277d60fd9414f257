pub mod commands;
pub mod output;

pub use commands::{
    handle_import, handle_import_file, handle_install_bundled, handle_status, ImportArgs,
    ImportFileArgs, InstallBundledArgs,
};
pub use output::OutputFormat;
