use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use seq_io::fastq::Reader as FastqReader;
use seq_io::fastq::RefRecord;

use crate::runtime::{Error, Result};

// niffler needs this many bytes to sniff the compression format
const MIN_SNIFF_LEN: u64 = 5;

///////////////////////////////
/// FASTQ records of one input file.
///
/// Wraps the seq_io reader so that a record cut off by the end of the file
/// ends the input with a warning instead of failing it
pub struct FastqInput<R: Read> {
    reader: FastqReader<R>,
    path: PathBuf,
    num_records: u64,
    truncated: bool,
}

impl<R: Read> FastqInput<R> {
    pub fn new<P: AsRef<Path>>(reader: R, path: P) -> FastqInput<R> {
        FastqInput {
            reader: FastqReader::new(reader),
            path: path.as_ref().to_path_buf(),
            num_records: 0,
            truncated: false,
        }
    }

    ///////////////////////////////
    /// Next complete record, or None at the end of input
    pub fn next_record(&mut self) -> Result<Option<RefRecord<'_>>> {
        if self.truncated {
            return Ok(None);
        }
        match self.reader.next() {
            None => Ok(None),
            Some(Ok(record)) => {
                self.num_records += 1;
                Ok(Some(record))
            }
            Some(Err(seq_io::fastq::Error::UnexpectedEnd { .. })) => {
                warn!(
                    "{} ends inside record {}; discarding it",
                    self.path.display(),
                    self.num_records + 1
                );
                self.truncated = true;
                Ok(None)
            }
            Some(Err(seq_io::fastq::Error::Io(e))) => Err(Error::io(&self.path, e)),
            Some(Err(e)) => Err(Error::file_not_valid(&self.path, Some(e.to_string()))),
        }
    }

    pub fn num_records(&self) -> u64 {
        self.num_records
    }

    /// Whether an incomplete trailing record was dropped
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

///////////////////////////////
/// Open a FASTQ file, decompressing it if needed
pub fn open_fastq<P: AsRef<Path>>(path: P) -> Result<FastqInput<Box<dyn Read>>> {
    let path = path.as_ref();
    let opened_handle = File::open(path).map_err(|e| Error::io(path, e))?;
    let len = opened_handle
        .metadata()
        .map_err(|e| Error::io(path, e))?
        .len();

    // Too short to hold a compression header, or a single record
    let reader: Box<dyn Read> = if len < MIN_SNIFF_LEN {
        Box::new(opened_handle)
    } else {
        let (reader, compression) = niffler::get_reader(Box::new(opened_handle))
            .map_err(|e| Error::file_not_valid(path, Some(e.to_string())))?;
        debug!(
            "Opened file {} with compression {:?}",
            path.display(),
            compression
        );
        reader
    };
    Ok(FastqInput::new(reader, path))
}
