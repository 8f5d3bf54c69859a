use crate::sanitize::{is_usable, sanitize_filename};
use crate::{Error, Wiki};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub trait Images {
    /// Save `url` as `<images_dir>/<group>/<filename>`, replacing any earlier copy.
    fn download_image(&self, url: &str, group: &str, filename: &str) -> Result<PathBuf, Error>;
}
impl Images for Wiki {
    fn download_image(&self, url: &str, group: &str, filename: &str) -> Result<PathBuf, Error> {
        // headers like ": Foo" leave no group name; such images go in the root
        let folder = if sanitize_filename(group).is_empty() {
            self.config.images_dir.clone()
        } else {
            self.config.images_dir.join(component(group)?)
        };
        fs::create_dir_all(&folder)?;
        let filename = component(filename)?;
        let path = folder.join(&filename);
        let mut response = self.get(url)?;
        let partial = folder.join(format!("{}.part", filename));
        let written = write_chunks(&mut response, &partial, self.config.chunk_size)
            .and_then(|()| fs::rename(&partial, &path).map_err(Error::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        info!("Downloaded: {} to {}", filename, folder.display());
        Ok(path)
    }
}

fn component(name: &str) -> Result<String, Error> {
    let sanitized = sanitize_filename(name);
    if is_usable(&sanitized) {
        Ok(sanitized)
    } else {
        Err(Error::InvalidName(name.to_owned()))
    }
}

fn write_chunks<R: Read>(body: &mut R, path: &Path, chunk_size: usize) -> Result<(), Error> {
    let mut file = BufWriter::new(File::create(path)?);
    let mut chunk = vec![0u8; chunk_size.max(1)];
    loop {
        let n = body.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        file.write_all(&chunk[..n])?;
    }
    file.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    Ok(())
}
