//! One-shot HTTP download of model artifacts.

use std::{
    io::{ErrorKind, Read, Write},
    path::Path,
};

use reqwest::blocking::Client;

use crate::{dc_err, dc_try, error::ClassifierError};

/// Size of the buffer the response body is streamed through
pub const CHUNK_SIZE: usize = 8192;

pub fn download_file(url: &str, dest: &Path) -> Result<u64, ClassifierError> {
    download_file_with(&Client::new(), url, dest)
}

/// Fetches `url` with a single GET and stores the body at `dest`.
///
/// Any non-2xx status aborts the download. The body goes to a temporary file next to `dest`
/// which is only renamed into place once complete, so a failed download leaves nothing behind.
/// There are no retries. Returns the number of bytes written.
pub fn download_file_with(client: &Client, url: &str, dest: &Path) -> Result<u64, ClassifierError> {
    tracing::info!("downloading {url}");
    let response = dc_try!(client.get(url).send());
    let mut response = response
        .error_for_status()
        .map_err(|error| dc_err!("unable to download '{url}': {error}"))?;

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = dc_try!(tempfile::NamedTempFile::new_in(dir));

    let mut chunk = [0u8; CHUNK_SIZE];
    let mut written: u64 = 0;
    loop {
        let len = match response.read(&mut chunk) {
            Ok(0) => break,
            Ok(len) => len,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(dc_err!("unable to download '{url}': {error}")),
        };
        dc_try!(file.write_all(&chunk[..len]));
        written += len as u64;
    }
    // Dropping the file would flush it too, but would not report any errors
    dc_try!(file.flush());
    file.persist(dest)
        .map_err(|error| dc_err!("unable to save '{}': {error}", dest.display()))?;

    tracing::info!("saved {written} bytes to {}", dest.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Answers exactly one HTTP request with the given status line and body.
    fn serve_once(status: &'static str, body: Vec<u8>) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/models/model.onnx", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            // consume the request headers
            loop {
                line.clear();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .into_bytes();
            response.extend_from_slice(&body);
            // the client may hang up early on an error status
            let _ = stream.write_all(&response);
            let _ = stream.flush();
        });
        (url, handle)
    }

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn test_download_spans_many_chunks() {
        let body: Vec<u8> = (0..CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let (url, server) = serve_once("200 OK", body.clone());
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("model.onnx");

        let written = download_file_with(&client(), &url, &dest).unwrap();
        server.join().unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[test]
    fn test_error_status_aborts_without_leaving_a_file() {
        let (url, server) = serve_once("404 Not Found", b"no such model".to_vec());
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("model.onnx");

        let err = download_file_with(&client(), &url, &dest).unwrap_err();
        server.join().unwrap();

        assert!(err.0.contains("404"), "{err}");
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unreachable_host_fails() {
        // nothing listens on the port once the listener is dropped
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("model.onnx");
        let url = format!("http://127.0.0.1:{port}/model.onnx");
        assert!(download_file_with(&client(), &url, &dest).is_err());
        assert!(!dest.exists());
    }
}
