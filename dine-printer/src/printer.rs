//! Printer adapters for sending receipts
//!
//! Supports:
//! - Network printers (TCP port 9100)
//! - Text previews written to a file or stdout

use crate::error::{PrintError, PrintResult};
use crate::escpos::Ticket;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send a finished ticket to the printer
    async fn print(&self, ticket: &Ticket) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        Self::from_addr(&format!("{host}:{port}"))
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {addr}")))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(ticket), fields(addr = %self.addr, data_len = ticket.data.len()))]
    async fn print(&self, ticket: &Ticket) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        stream.write_all(&ticket.data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(e.kind(), format!("Write failed: {e}")))
        })?;
        stream.flush().await?;

        info!("Print job sent");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}

/// Writes the plain-text preview instead of printing
///
/// Without a path the preview goes to stdout; with one, tickets are appended
/// to the file separated by a blank line.
#[derive(Debug, Clone, Default)]
pub struct TextPrinter {
    path: Option<PathBuf>,
}

impl TextPrinter {
    pub fn stdout() -> Self {
        Self { path: None }
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl Printer for TextPrinter {
    async fn print(&self, ticket: &Ticket) -> PrintResult<()> {
        match &self.path {
            None => {
                let mut out = tokio::io::stdout();
                out.write_all(ticket.preview.as_bytes()).await?;
                out.write_all(b"\n").await?;
                out.flush().await?;
            }
            Some(path) => {
                let mut file = tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await?;
                file.write_all(ticket.preview.as_bytes()).await?;
                file.write_all(b"\n").await?;
                file.flush().await?;
            }
        }
        Ok(())
    }

    async fn is_online(&self) -> bool {
        true
    }
}

/// Printer chosen at runtime from configuration
#[derive(Debug, Clone)]
pub enum AnyPrinter {
    Network(NetworkPrinter),
    Text(TextPrinter),
}

impl Printer for AnyPrinter {
    async fn print(&self, ticket: &Ticket) -> PrintResult<()> {
        match self {
            AnyPrinter::Network(p) => p.print(ticket).await,
            AnyPrinter::Text(p) => p.print(ticket).await,
        }
    }

    async fn is_online(&self) -> bool {
        match self {
            AnyPrinter::Network(p) => p.is_online().await,
            AnyPrinter::Text(p) => p.is_online().await,
        }
    }
}
