//! Shared HTTP agent construction and bounded response reading.

use std::io::{self, Read};
use std::time::Duration;

use crate::config::ServiceSettings;

/// Build an agent whose timeouts follow the service settings.
pub(crate) fn agent(settings: &ServiceSettings) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(settings.connect_timeout_secs))
        .timeout_read(Duration::from_secs(settings.read_timeout_secs))
        .timeout_write(Duration::from_secs(settings.read_timeout_secs))
        .build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

/// Read a response body as UTF-8 text, enforcing a maximum byte size.
pub(crate) fn read_response_text(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    let bytes = read_response_bytes(response, max_bytes)?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;

    fn settings() -> ServiceSettings {
        ServiceSettings::default()
    }

    #[test]
    fn read_response_bytes_rejects_content_length_over_max() {
        let response = "HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nok".to_string();
        let (url, _) = serve_once(response);
        let response = agent(&settings()).get(&url).call().unwrap();
        let err = read_response_bytes(response, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn read_response_bytes_rejects_body_over_max() {
        let body = "a".repeat(32);
        let (url, _) = serve_once(format!("HTTP/1.0 200 OK\r\n\r\n{body}"));
        let response = agent(&settings()).get(&url).call().unwrap();
        let err = read_response_bytes(response, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn read_response_text_accepts_under_limit() {
        let body = "hello";
        let (url, _) = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ));
        let response = agent(&settings()).get(&url).call().unwrap();
        assert_eq!(read_response_text(response, 16).unwrap(), "hello");
    }
}
