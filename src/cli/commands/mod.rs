pub mod import;
pub mod status;

pub use import::{
    handle_import, handle_import_file, handle_install_bundled, ImportArgs, ImportFileArgs,
    InstallBundledArgs,
};
pub use status::handle_status;
