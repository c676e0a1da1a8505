use clap::Parser;
use seat_reserve::app::menu::MenuSession;
use seat_reserve::config::cli::write_report;
use seat_reserve::config::{Command, ReserveArgs};
use seat_reserve::core::box_office::Proposal;
use seat_reserve::core::sales::{ReportFormat, SalesSummary};
use seat_reserve::core::{ChartStore, ConfigProvider, Confirm, ReservationRequest, TicketCounts};
use seat_reserve::utils::error::ErrorSeverity;
use seat_reserve::utils::logger;
use seat_reserve::{BoxOffice, CliConfig, FileChartStore, ReservationError, Settings};
use std::path::Path;

/// 非互動模式：顯示最佳座位提案，依 --yes 決定是否接受
struct OfferNotice {
    accept: bool,
}

impl Confirm for OfferNotice {
    fn confirm(&mut self, proposal: &Proposal) -> bool {
        if let Some(reason) = proposal.fallback_reason() {
            println!("{}. Searching for best available seats.", reason);
        }
        println!(
            "Best available seats found: {} (${})",
            proposal.run(),
            proposal.amount()
        );
        if !self.accept {
            println!("💡 Re-run with --yes to reserve these seats");
        }
        self.accept
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::info!("🚀 Starting seat-reserve");
    tracing::debug!("Settings: {:?}", settings);

    let store = FileChartStore::default();
    if let Err(e) = run(&config, &settings, &store).await {
        tracing::error!(
            "❌ seat-reserve failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}

async fn run(
    config: &CliConfig,
    settings: &Settings,
    store: &FileChartStore,
) -> seat_reserve::Result<()> {
    let auditorium = store.read_chart(settings.chart_path()).await?;
    tracing::info!(
        "📁 Loaded {} rows ({} columns max) from {}",
        auditorium.num_rows(),
        auditorium.max_columns(),
        settings.chart_path()
    );
    let mut office = BoxOffice::new(auditorium);

    match config.command.clone().unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let summary = {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                let mut session = MenuSession::new(stdin.lock(), stdout.lock());
                session.run(&mut office)?
            };
            save_chart(store, settings, &office).await?;
            // 文字報表已由選單印出
            if settings.report_format() != ReportFormat::Text {
                println!("{}", summary.render(settings.report_format())?);
            }
            save_report(settings, &summary).await?;
        }
        Command::Reserve(args) => {
            reserve(&mut office, &args)?;
            save_chart(store, settings, &office).await?;
        }
        Command::Report => {
            let summary = office.summary();
            print!("{}", summary.render(settings.report_format())?);
            save_report(settings, &summary).await?;
        }
    }

    Ok(())
}

fn reserve(office: &mut BoxOffice, args: &ReserveArgs) -> seat_reserve::Result<()> {
    let request = ReservationRequest {
        row: args.row,
        start: args.seat.map(|c| c.to_ascii_uppercase()),
        tickets: TicketCounts::new(args.adults, args.children, args.seniors),
    };

    let outcome = office.reserve(&request, &mut OfferNotice { accept: args.yes })?;
    println!(
        "Seats successfully reserved! {} (${})",
        outcome.receipt.run, outcome.receipt.amount
    );
    Ok(())
}

async fn save_chart(
    store: &FileChartStore,
    settings: &Settings,
    office: &BoxOffice,
) -> seat_reserve::Result<()> {
    store
        .write_chart(settings.output_path(), office.auditorium())
        .await?;
    tracing::info!("📁 Seating chart saved to: {}", settings.output_path());
    Ok(())
}

async fn save_report(settings: &Settings, summary: &SalesSummary) -> seat_reserve::Result<()> {
    if let Some(path) = settings.report_path() {
        let content = summary.render(settings.report_format())?;
        write_report(Path::new(path), &content).await?;
        tracing::info!("📁 Sales report saved to: {}", path);
    }
    Ok(())
}

/// 根據錯誤嚴重程度決定退出碼
fn exit_code(error: &ReservationError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
