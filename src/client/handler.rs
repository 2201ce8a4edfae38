use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

use crate::config::ServerConfig;
use crate::grid::GridFs;
use crate::protocol::responses::{self, format_response};
use crate::protocol::{CommandStatus, handle_command, parse_command};

/// Handles one client session.
///
/// - Uses BufReader to read command lines from the client, never buffering
///   more than `max_command_length + 1` bytes of a single line.
/// - Dispatches commands using `handle_command`.
/// - Returns when the client quits, disconnects, or the stream fails.
pub async fn handle_client<S>(
    stream: S,
    client_addr: SocketAddr,
    fs: Arc<GridFs>,
    config: Arc<ServerConfig>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::with_capacity(config.max_command_length + 1);
    let limit = config.max_command_length as u64 + 1;

    let greeting = format_response(responses::READY, "Grid filesystem ready");
    if let Err(e) = write_half.write_all(greeting.as_bytes()).await {
        error!("Failed to greet {}: {}", client_addr, e);
        return;
    }

    loop {
        line.clear();
        match (&mut reader).take(limit).read_until(b'\n', &mut line).await {
            Ok(0) => {
                // Client closed the connection
                info!("Connection closed by client {}", client_addr);
                break;
            }
            Ok(_) => {
                // Enforce command length limit
                if line.len() > config.max_command_length {
                    if !line.ends_with(b"\n") {
                        if let Err(e) = discard_line(&mut reader).await {
                            error!("Failed to read from {}: {}", client_addr, e);
                            break;
                        }
                    }
                    warn!("Rejected oversized command from {}", client_addr);
                    let reply = format_response(responses::SYNTAX_ERROR, "Command too long");
                    let _ = write_half.write_all(reply.as_bytes()).await;
                    continue;
                }

                let Ok(text) = std::str::from_utf8(&line) else {
                    warn!("Rejected non UTF-8 command from {}", client_addr);
                    let reply = format_response(responses::SYNTAX_ERROR, "Invalid UTF-8 in command");
                    let _ = write_half.write_all(reply.as_bytes()).await;
                    continue;
                };

                let trimmed = text.trim_end_matches(['\r', '\n']);
                let command = parse_command(trimmed);
                info!("Received from {}: {:?}", client_addr, &command);

                let result = handle_command(&fs, &command);
                if let Some(msg) = &result.message {
                    if let Err(e) = write_half.write_all(msg.as_bytes()).await {
                        error!("Failed to write to {}: {}", client_addr, e);
                        break;
                    }
                }

                if result.status == CommandStatus::CloseConnection {
                    info!("Client {} requested to quit", client_addr);
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read from {}: {}", client_addr, e);
                break;
            }
        }
    }

    let _ = write_half.flush().await;
    info!("Client {} disconnected", client_addr);
}

/// Skips input up to and including the next newline, or to end of stream.
async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (consumed, done) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(consumed);
        if done {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::grid::FileInfo;

    #[tokio::test]
    async fn test_session_round_trip() {
        let (client, server) = tokio::io::duplex(4096);
        let fs = Arc::new(GridFs::from_config(&StoreConfig::default()));
        let config = Arc::new(ServerConfig::default());
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        let session = tokio::spawn(handle_client(server, addr, fs.clone(), config));

        let (mut rx, mut tx) = tokio::io::split(client);
        tx.write_all(b"MKDS /a/b\r\nLIST /a\r\nQUIT\r\n").await.unwrap();

        let mut output = String::new();
        rx.read_to_string(&mut output).await.unwrap();
        session.await.unwrap();

        assert_eq!(
            output,
            "220 Grid filesystem ready\r\n\
             200 /a/b: Directory tree created\r\n\
             250-/a/b\r\n\
             250 1 entries\r\n\
             221 Goodbye\r\n"
        );
        assert!(fs.file("/a").exists());
    }

    #[tokio::test]
    async fn test_long_command_rejected() {
        let (client, server) = tokio::io::duplex(4096);
        let fs = Arc::new(GridFs::from_config(&StoreConfig::default()));
        let config = Arc::new(ServerConfig {
            max_command_length: 16,
            ..ServerConfig::default()
        });
        let addr: SocketAddr = "127.0.0.1:40001".parse().unwrap();

        let session = tokio::spawn(handle_client(server, addr, fs, config));

        let (mut rx, mut tx) = tokio::io::split(client);
        tx.write_all(b"MKDS /a/very/long/path/indeed\r\nQUIT\r\n")
            .await
            .unwrap();

        let mut output = String::new();
        rx.read_to_string(&mut output).await.unwrap();
        session.await.unwrap();

        assert!(output.contains("500 Command too long\r\n"));
        assert!(output.ends_with("221 Goodbye\r\n"));
    }

    #[tokio::test]
    async fn test_unterminated_flood_rejected_once() {
        let (client, server) = tokio::io::duplex(4096);
        let fs = Arc::new(GridFs::from_config(&StoreConfig::default()));
        let config = Arc::new(ServerConfig {
            max_command_length: 64,
            ..ServerConfig::default()
        });
        let addr: SocketAddr = "127.0.0.1:40002".parse().unwrap();

        let session = tokio::spawn(handle_client(server, addr, fs.clone(), config));

        let (mut rx, mut tx) = tokio::io::split(client);
        let mut input = vec![b'A'; 10_000];
        input.extend_from_slice(b"\r\nMKDS /ok\r\nQUIT\r\n");
        tx.write_all(&input).await.unwrap();

        let mut output = String::new();
        rx.read_to_string(&mut output).await.unwrap();
        session.await.unwrap();

        assert_eq!(output.matches("500 Command too long\r\n").count(), 1);
        assert!(output.contains("200 /ok: Directory tree created\r\n"));
        assert!(output.ends_with("221 Goodbye\r\n"));
        assert!(fs.file("/ok").is_directory());
    }

    #[tokio::test]
    async fn test_invalid_utf8_gets_reply() {
        let (client, server) = tokio::io::duplex(4096);
        let fs = Arc::new(GridFs::from_config(&StoreConfig::default()));
        let config = Arc::new(ServerConfig::default());
        let addr: SocketAddr = "127.0.0.1:40003".parse().unwrap();

        let session = tokio::spawn(handle_client(server, addr, fs, config));

        let (mut rx, mut tx) = tokio::io::split(client);
        tx.write_all(b"\xff\xfe\r\nQUIT\r\n").await.unwrap();

        let mut output = String::new();
        rx.read_to_string(&mut output).await.unwrap();
        session.await.unwrap();

        assert_eq!(
            output,
            "220 Grid filesystem ready\r\n\
             500 Invalid UTF-8 in command\r\n\
             221 Goodbye\r\n"
        );
    }
}
