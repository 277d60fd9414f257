use crate::cli::output::{print_installed, OutputFormat};
use anyhow::Result;
use skyline_keys::{KeyStore, Settings};

pub fn handle_status(settings: &Settings, format: OutputFormat) -> Result<()> {
    let store = KeyStore::new(&settings.store.keys_dir);
    let installed = store.installed()?;
    print_installed(&installed, store.root(), format)
}
