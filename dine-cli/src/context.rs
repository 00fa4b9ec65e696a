//! Everything a command needs: API client, print station, confirmation prompt

use crate::cli::Cli;
use crate::error::{CliError, CliResult};
use dine_client::pages::{AutoConfirm, Confirm};
use dine_client::receipt::{PrintStation, ReceiptConfig};
use dine_client::{ClientConfig, DineClient, SessionHandle, SessionStore};
use dine_printer::{AnyPrinter, NetworkPrinter, TextPrinter};
use shared::client::Area;
use shared::order::Confirmation;
use std::io::{self, BufRead, Write};
use tracing::debug;

const DEFAULT_PRINTER_PORT: u16 = 9100;

pub struct Context {
    pub client: DineClient,
    pub station: PrintStation<AnyPrinter>,
    confirm: Box<dyn Confirm>,
}

impl Context {
    pub async fn new(cli: &Cli) -> CliResult<Self> {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &cli.api_url {
            config = config.with_base_url(url.as_str());
        }

        let store = SessionStore::new(&cli.data_dir);
        let session = SessionHandle::new(store.load().await);
        let client = DineClient::new(&config, session)?.with_store(store);

        let receipt = ReceiptConfig {
            width: cli.paper_width,
            encoding: cli.printer_encoding,
            header: cli.receipt_header.clone(),
        };
        let station = PrintStation::new(parse_printer(&cli.printer)?, receipt);

        let confirm: Box<dyn Confirm> = if cli.yes {
            Box::new(AutoConfirm(true))
        } else {
            Box::new(StdinConfirm)
        };

        debug!(base_url = %config.base_url, printer = %cli.printer, "Context ready");
        Ok(Self {
            client,
            station,
            confirm,
        })
    }

    pub fn confirm(&self) -> &dyn Confirm {
        self.confirm.as_ref()
    }

    /// Fail early unless the stored session may use `area`
    pub async fn require(&self, area: Area) -> CliResult<()> {
        self.client.session().require(area).await?;
        Ok(())
    }

    /// Load the dish catalog into the print station so receipts can name items
    pub async fn load_catalog(&mut self) -> CliResult<()> {
        let mut dishes = Vec::new();
        let mut page = 1;
        loop {
            let chunk = self.client.dishes(page).await?;
            let more = chunk.has_next();
            dishes.extend(chunk.results);
            if !more {
                break;
            }
            page += 1;
        }
        debug!(count = dishes.len(), "Dish catalog loaded");
        self.station.set_dishes(dishes);
        Ok(())
    }
}

/// `stdout`, `file:<path>`, `<host>:<port>` or a bare host on port 9100
pub fn parse_printer(target: &str) -> CliResult<AnyPrinter> {
    let target = target.trim();
    if target.is_empty() {
        return Err(CliError::InvalidPrinter(target.to_string()));
    }
    if target.eq_ignore_ascii_case("stdout") || target == "-" {
        return Ok(AnyPrinter::Text(TextPrinter::stdout()));
    }
    if let Some(path) = target.strip_prefix("file:") {
        if path.is_empty() {
            return Err(CliError::InvalidPrinter(target.to_string()));
        }
        return Ok(AnyPrinter::Text(TextPrinter::to_file(path)));
    }
    let printer = match target.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse()
                .map_err(|_| CliError::InvalidPrinter(target.to_string()))?;
            NetworkPrinter::new(host, port)?
        }
        None => NetworkPrinter::new(target, DEFAULT_PRINTER_PORT)?,
    };
    Ok(AnyPrinter::Network(printer))
}

/// Asks on the terminal; anything but y/yes declines
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, confirmation: &Confirmation) -> bool {
        print!("{} {} [y/N] ", confirmation.title, confirmation.text);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Read one trimmed line from stdin after a prompt
pub fn prompt(label: &str) -> CliResult<String> {
    eprint!("{label}: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printer_targets() {
        assert!(matches!(parse_printer("stdout").unwrap(), AnyPrinter::Text(_)));
        assert!(matches!(parse_printer("file:/tmp/receipts.txt").unwrap(), AnyPrinter::Text(_)));
        match parse_printer("192.168.1.50:9101").unwrap() {
            AnyPrinter::Network(p) => assert_eq!(p.addr().port(), 9101),
            other => panic!("unexpected printer {other:?}"),
        }
        match parse_printer("192.168.1.50").unwrap() {
            AnyPrinter::Network(p) => assert_eq!(p.addr().port(), 9100),
            other => panic!("unexpected printer {other:?}"),
        }
        assert!(parse_printer("").is_err());
        assert!(parse_printer("file:").is_err());
        assert!(parse_printer("10.0.0.1:printer").is_err());
    }
}
