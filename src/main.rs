use anyhow::Context;
use clap::Parser;
use taxdesk::app::report;
use taxdesk::app::DynSession;
use taxdesk::config::{Command, LoginArgs};
use taxdesk::core::session::AuthenticatedUser;
use taxdesk::utils::error::{ErrorSeverity, TaxError};
use taxdesk::utils::{logger, validation::Validate};
use taxdesk::{build_session, AppConfig, Cli, InteractiveShell};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 載入配置：設定檔 (可選) 再套用命令列覆蓋
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => AppConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::info!("Starting taxdesk");
    if let Some(path) = &cli.config {
        tracing::info!("📁 Configuration loaded from: {}", path.display());
    }
    tracing::debug!("Config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command.unwrap_or(Command::Shell), &config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<(), TaxError> {
    let session = build_session(config)?;
    let stdout = std::io::stdout();

    match command {
        Command::Shell => {
            let stdin = std::io::stdin();
            let mut shell = InteractiveShell::new(&session, stdin.lock(), stdout.lock());
            shell.run().await
        }
        Command::Calc {
            login,
            income,
            deductions,
            json,
        } => {
            let user = login_with(&session, &login)?;
            let outcome = session.submit(&user, &income, &deductions).await?;
            let mut out = stdout.lock();
            if json {
                report::write_outcome_json(&mut out, &outcome)
            } else {
                report::write_outcome(&mut out, &outcome)
            }
        }
        Command::History { login, format } => {
            let user = login_with(&session, &login)?;
            let calculations = session.history(&user).await?;
            report::write_history(&mut stdout.lock(), &calculations, format)
        }
    }
}

fn login_with(session: &DynSession, login: &LoginArgs) -> Result<AuthenticatedUser, TaxError> {
    session.login(&login.username, &login.password)
}
