use std::io::{self, Read};
use std::path::Path;

/// Read a file to a string, or standard input if the path is "-".
pub fn read(path: &Path) -> io::Result<String> {
    let mut s = String::new();
    if path == Path::new("-") {
        io::stdin().read_to_string(&mut s)?;
    } else {
        std::fs::File::open(path)?.read_to_string(&mut s)?;
    }
    Ok(s)
}
