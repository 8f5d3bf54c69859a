use std::path::PathBuf;

pub const PAGE_URL: &str = "https://helldivers.fandom.com/wiki/Stratagem_Codes";

#[derive(Clone, Debug)]
pub struct Config {
    pub useragent: String,
    pub page_url: String,
    /// Root of the per-group image folders.
    pub images_dir: PathBuf,
    pub csv_path: PathBuf,
    /// Read size used when streaming image bodies to disk.
    pub chunk_size: usize,
}
impl Default for Config {
    fn default() -> Config {
        Config {
            useragent: concat!("stratagems/", env!("CARGO_PKG_VERSION")).to_owned(),
            page_url: PAGE_URL.to_owned(),
            images_dir: PathBuf::from("data").join("images"),
            csv_path: PathBuf::from("data").join("Stratagems.csv"),
            chunk_size: 1024,
        }
    }
}
