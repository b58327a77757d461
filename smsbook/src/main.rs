use clap::{Parser, ValueEnum};
use smsbooklib::{
    classify::RuleClassifier,
    dedup::TransactionDedup,
    error::{Result, SmsBookError},
    model::{EnrichedRecord, RawRecord},
    month::MonthYear,
    paginator::{PagerConfig, DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE},
    sources::{csv::CsvInbox, xml::SmsBackupXml},
    store::MessageStore,
    traits::{Classifier, DuplicateFilter, MessageSource, SenderFilter},
};
use std::fs::File;
use std::io::{self, BufRead, Write};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InFmt {
    Csv,
    Xml,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutFmt {
    Table,
    Csv,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Nav {
    Next,
    Prev,
}

#[derive(Parser, Debug)]
#[command(name = "smsbook", version, about = "Bank SMS inbox as pages of transactions")]
struct Cli {
    /// Выгрузка входящих SMS
    #[arg(short = 'i', long = "input")]
    input: String,

    /// Формат выгрузки
    #[arg(long = "in-format", value_enum, default_value = "csv")]
    in_format: InFmt,

    /// Адрес банковского отправителя (можно несколько; по умолчанию все)
    #[arg(long = "sender")]
    senders: Vec<String>,

    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    #[arg(long = "window-size", default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Шаги навигации после открытия первой страницы
    #[arg(long = "nav", value_enum)]
    nav: Vec<Nav>,

    /// Читать команды n / p / q со stdin
    #[arg(long)]
    interactive: bool,

    #[arg(long = "out-format", value_enum, default_value = "table")]
    out_format: OutFmt,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = PagerConfig::new(cli.page_size, cli.window_size)?;
    let senders = SenderFilter::new(&cli.senders);

    let source: Box<dyn MessageSource> = match cli.in_format {
        InFmt::Csv => Box::new(CsvInbox::new(&cli.input)),
        InFmt::Xml => Box::new(SmsBackupXml::new(&cli.input)),
    };

    let mut store = MessageStore::new(source, RuleClassifier::new(), TransactionDedup::new(), senders, config)?;
    store.ingest(false)?;

    // первая страница появляется только после первого next()
    store.next();
    for step in &cli.nav {
        match step {
            Nav::Next => store.next(),
            Nav::Prev => store.previous(),
        }
    }

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    if cli.interactive {
        let stdin = io::stdin();
        print_page(&mut writer, &store, OutFmt::Table)?;
        for line in stdin.lock().lines() {
            match line?.trim() {
                "n" | "next" => store.next(),
                "p" | "prev" | "previous" => store.previous(),
                "r" | "reload" => {
                    store.ingest(true)?;
                    store.next();
                }
                "q" | "quit" => break,
                other => {
                    log::warn!("unknown command {other:?}: use n, p, r or q");
                    continue;
                }
            }
            print_page(&mut writer, &store, OutFmt::Table)?;
        }
    } else {
        print_page(&mut writer, &store, cli.out_format)?;
    }

    writer.flush().map_err(SmsBookError::from)
}

fn print_page<S, C, F>(w: &mut dyn Write, store: &MessageStore<S, C, F>, fmt: OutFmt) -> Result<()>
where
    S: MessageSource,
    C: Classifier,
    F: DuplicateFilter,
{
    let raw = store.visible_raw()?;
    let enriched = store.visible_enriched()?;

    match fmt {
        OutFmt::Table => write_table(w, store, raw, enriched),
        OutFmt::Csv => write_csv(w, raw, enriched),
    }
}

fn write_table<S, C, F>(
    w: &mut dyn Write,
    store: &MessageStore<S, C, F>,
    raw: &[RawRecord],
    enriched: &[EnrichedRecord],
) -> Result<()>
where
    S: MessageSource,
    C: Classifier,
    F: DuplicateFilter,
{
    let pager = store.paginator();
    let range = pager.visible_range();
    writeln!(
        w,
        "records {}..{} of {} (window slot {}/{}){}",
        range.start,
        range.end,
        store.total_count(),
        pager.current_window(),
        pager.config().window_size,
        months_label(raw)
    )?;
    for e in enriched {
        writeln!(
            w,
            "{:<10} {:<28} {:>14} {:>6} {}",
            e.kind.as_str(),
            e.originator,
            e.formatted_amount(),
            e.card_info,
            e.display_date
        )?;
    }
    let prev = if store.can_go_previous() { "[p]rev" } else { "" };
    let next = if store.can_go_next() { "[n]ext" } else { "" };
    writeln!(w, "{prev} {next}")?;
    Ok(())
}

/// Месяцы страницы, например ` | MARCH 2016 .. FEBRUARY 2016`.
fn months_label(raw: &[RawRecord]) -> String {
    let first = raw.first().and_then(|r| MonthYear::of_timestamp(r.timestamp));
    let last = raw.last().and_then(|r| MonthYear::of_timestamp(r.timestamp));
    match (first, last) {
        (Some(a), Some(b)) if a == b => format!(" | {a}"),
        (Some(a), Some(b)) => format!(" | {a} .. {b}"),
        _ => String::new(),
    }
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    id: i64,
    sender: &'a str,
    kind: &'a str,
    originator: &'a str,
    amount: String,
    currency: &'a str,
    card: &'a str,
    date: &'a str,
}

fn write_csv(w: &mut dyn Write, raw: &[RawRecord], enriched: &[EnrichedRecord]) -> Result<()> {
    let mut wrt = csv::WriterBuilder::new().from_writer(w);
    for (r, e) in raw.iter().zip(enriched) {
        wrt.serialize(CsvOutRow {
            id: r.id,
            sender: &r.sender,
            kind: e.kind.as_str(),
            originator: &e.originator,
            amount: e.amount.map(|a| a.to_string()).unwrap_or_default(),
            currency: &e.currency,
            card: &e.card_info,
            date: &e.display_date,
        })?;
    }
    wrt.flush()?;
    Ok(())
}
