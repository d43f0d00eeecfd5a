use crate::core::error::CheckError;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Stdin};
use std::path::Path;

pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    pub fn open(file: &File) -> io::Result<Self> {
        // SAFETY: read-only file mapping.
        let mmap = unsafe { Mmap::map(file) }?;
        Ok(Self { mmap })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }
}

/// Where the FASTQ bytes come from.
pub enum InputSource {
    Stdin(Stdin),
    Mmap(MmapSource),
    /// Empty files and anything that cannot be mapped (pipes, devices).
    Buffered(BufReader<File>),
}

impl InputSource {
    /// `None` or `-` selects standard input.
    pub fn open(path: Option<&Path>) -> Result<Self, CheckError> {
        let path = match path {
            Some(p) if p.as_os_str() != "-" => p,
            _ => return Ok(InputSource::Stdin(io::stdin())),
        };
        let open_err = |source| CheckError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(open_err)?;
        let meta = file.metadata().map_err(open_err)?;
        if meta.is_dir() {
            return Err(open_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }
        if meta.is_file() && meta.len() > 0 {
            let source = MmapSource::open(&file).map_err(open_err)?;
            return Ok(InputSource::Mmap(source));
        }
        Ok(InputSource::Buffered(BufReader::new(file)))
    }

    /// Size of the input in bytes when known up front.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            InputSource::Mmap(source) => Some(source.len()),
            _ => None,
        }
    }

    pub fn reader(&mut self) -> Box<dyn BufRead + '_> {
        match self {
            InputSource::Stdin(stdin) => Box::new(stdin.lock()),
            InputSource::Mmap(source) => Box::new(source.bytes()),
            InputSource::Buffered(reader) => Box::new(reader),
        }
    }
}
