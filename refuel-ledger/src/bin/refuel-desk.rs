//! Terminal front end for the refuel ledger
//!
//! Reads one command per line from stdin. The form and the table view live
//! here; every business rule goes through the library.

use anyhow::Context;
use chrono::Local;
use refuel_ledger::{
    spawn_ledger_actor, Config, CurrencyFormat, LedgerHandle, LedgerRecord, Metrics, PlateId,
    RefuelForm, ViewState,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  name <text>       owner full name
  contact <text>    contact number
  plate <text>      vehicle plate
  amount <digits>   amount in cents, e.g. 15000 for 150,00
  blur | focus      show the amount as currency / back to digits
  submit            record the refuel
  list              show the current page
  next | prev       change page
  page <n>          jump to page n
  expand <plate>    show or hide a plate's history
  export            print all records as JSON
  metrics           print Prometheus metrics
  help | quit";

struct Desk {
    ledger: LedgerHandle,
    metrics: Metrics,
    format: CurrencyFormat,
    form: RefuelForm,
    view: ViewState,
}

impl Desk {
    async fn handle(&mut self, line: &str) -> anyhow::Result<bool> {
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "name" => self.form.name = arg.to_string(),
            "contact" => self.form.contact = arg.to_string(),
            "plate" => self.form.plate = arg.to_string(),
            "amount" => {
                self.form.on_amount_input(arg);
                println!("amount: {}", self.form.amount());
            }
            "blur" => {
                self.form.on_amount_blur();
                println!("amount: {}", self.form.amount());
            }
            "focus" => {
                self.form.on_amount_focus();
                println!("amount: {}", self.form.amount());
            }
            "submit" => self.submit().await?,
            "list" => self.render().await?,
            "next" | "prev" | "page" => {
                let len = self.ledger.snapshot().await?.len();
                match command {
                    "next" => self.view.next_page(len),
                    "prev" => self.view.previous_page(len),
                    _ => {
                        let page: usize = arg.parse().with_context(|| format!("Invalid page: {}", arg))?;
                        self.view.go_to(page, len)
                    }
                };
                self.render().await?;
            }
            "expand" => {
                self.view.toggle_expanded(&PlateId::new(arg));
                self.render().await?;
            }
            "export" => {
                let records = self.ledger.snapshot().await?;
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
            "metrics" => print!("{}", self.metrics.render()?),
            "help" => println!("{}", HELP),
            "quit" | "exit" => return Ok(false),
            other => println!("Unknown command: {} (try help)", other),
        }

        Ok(true)
    }

    async fn submit(&mut self) -> anyhow::Result<()> {
        let submission = match self.form.prepare() {
            Ok(submission) => submission,
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };

        match self
            .ledger
            .record_refuel(
                submission.plate_id,
                submission.owner_name,
                submission.contact,
                submission.amount,
            )
            .await
        {
            Ok(record) => {
                self.form.clear();
                println!(
                    "Recorded {} for {}: {} ticket(s) in total",
                    self.format.format_amount(submission.amount),
                    record.plate_id,
                    record.total_tickets
                );
            }
            Err(e) if e.is_input_violation() => println!("{}", e),
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    async fn render(&self) -> anyhow::Result<()> {
        let records = self.ledger.snapshot().await?;
        let page = self.view.current(&records);

        println!(
            "{:<24} {:<16} {:<10} {:>7}",
            "Name", "Contact", "Plate", "Tickets"
        );
        for record in page.items {
            println!(
                "{:<24} {:<16} {:<10} {:>7}",
                record.owner_name, record.contact, record.plate_id, record.total_tickets
            );
            if self.view.is_expanded(&record.plate_id) {
                self.render_history(record);
            }
        }
        println!("Page {} of {}", page.number, page.count);

        Ok(())
    }

    fn render_history(&self, record: &LedgerRecord) {
        println!("  Refuel history:");
        for event in &record.events {
            println!(
                "    {}: {} - Tickets: {}",
                event.timestamp.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S"),
                self.format.format_amount(event.amount),
                event.ticket_count
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays the UI
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::var("REFUEL_CONFIG") {
        Ok(path) => Config::from_file(&path).with_context(|| format!("Loading {}", path))?,
        Err(_) => Config::from_env()?,
    };
    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        "Starting refuel desk"
    );

    let metrics = Metrics::new()?;
    let ledger = spawn_ledger_actor(
        refuel_ledger::Ledger::new(&config)?,
        metrics.clone(),
        config.actor.mailbox_capacity,
    );
    let format = CurrencyFormat::from(&config.currency);

    let mut desk = Desk {
        ledger: ledger.clone(),
        metrics,
        form: RefuelForm::new(format.clone()),
        format,
        view: ViewState::new(config.view.page_size),
    };

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match desk.handle(line.trim()).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("error: {:#}", e),
        }
    }

    ledger.shutdown().await?;
    tracing::info!("Shutting down refuel desk");
    Ok(())
}
