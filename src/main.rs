//! `omniconnect` command-line front end.
//!
//! Every command opens the local store, rebuilds the chat repository from
//! the persisted snapshot (or the seed data on first run), does its work
//! and writes the snapshot back when something changed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use omniconnect::calc::{CalcError, Calculator};
use omniconnect::convert::{self, TemperatureUnit};
use omniconnect::error::{ErrorCode, describe};
use omniconnect::llm::config::{DEFAULT_GEMINI_BASE_URL, LlmConfig};
use omniconnect::llm::{LlmClient, LlmError};
use omniconnect::messaging::filter::{self, ChatTab};
use omniconnect::messaging::labels::{LabelEditor, LabelSelection};
use omniconnect::messaging::recorder::{FileCapture, RecorderError, VoiceRecorder, format_recording_time};
use omniconnect::messaging::service::{Attachment, MessageService};
use omniconnect::messaging::{ChatRepository, LabelColor, MemoryRepository, StoreError};
use omniconnect::settings::{self, AccentColor, AppSettings, SettingsPatch, ThemeMode};
use omniconnect::solver::MathSolver;
use omniconnect::stopwatch::{Stopwatch, StopwatchError, format_time};
use omniconnect::storage::{DEFAULT_STORE_PATH, LocalStore, StorageError};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Stopwatch(#[from] StopwatchError),
    #[error(transparent)]
    Recorder(#[from] RecorderError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("nothing to send; pass a message, --file or --voice")]
    NothingToSend,
    #[error("nothing to solve")]
    EmptyProblem,
    #[error("voice capture produced no clip")]
    NoRecording,
    #[error("invalid file path: {0}")]
    InvalidPath(String),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Calc(e) => e.error_code(),
            Self::Stopwatch(e) => e.error_code(),
            Self::Recorder(e) => e.error_code(),
            Self::Llm(e) => e.error_code(),
            Self::Json(_) => "E_JSON",
            Self::NothingToSend | Self::EmptyProblem | Self::InvalidPath(_) => "E_USAGE",
            Self::NoRecording => "E_NO_RECORDING",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Llm(e) => e.retryable(),
            _ => false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "omniconnect", about = "OmniConnect business messaging and utility tools")]
struct Cli {
    /// Local storage file.
    #[arg(long, env = "OMNI_STORE_PATH", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List chats for a tab, optionally filtered by name or label.
    Chats {
        #[arg(long, default_value = "customers")]
        tab: ChatTab,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print one chat's message history.
    Show { chat_id: String },
    Labels(LabelsCommand),
    /// Send a text message, an attachment, or a voice note.
    Send(SendArgs),
    /// Evaluate expressions, or press calculator keys with --keys.
    Calc {
        #[arg(required = true, allow_hyphen_values = true)]
        inputs: Vec<String>,
        #[arg(long)]
        keys: bool,
        #[arg(long)]
        history: bool,
    },
    /// Convert a temperature between units.
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, default_value = "celsius")]
        from: TemperatureUnit,
        #[arg(long, default_value = "fahrenheit")]
        to: TemperatureUnit,
    },
    /// Run the stopwatch for a while, taking laps at a fixed interval.
    Stopwatch {
        #[arg(long, default_value_t = 3000)]
        duration_ms: u64,
        #[arg(long)]
        lap_every_ms: Option<u64>,
    },
    /// Ask the text-generation model to solve a problem step by step.
    Solve {
        #[arg(required = true)]
        problem: Vec<String>,
    },
    Settings(SettingsCommand),
    /// Discard local changes and restore the seed chats and labels.
    Reset,
}

#[derive(Args, Debug)]
struct LabelsCommand {
    #[command(subcommand)]
    command: LabelsSubcommand,
}

#[derive(Subcommand, Debug)]
enum LabelsSubcommand {
    /// List labels with their chat counts.
    List,
    /// Toggle labels on a chat and save the selection.
    Assign {
        chat_id: String,
        #[arg(long = "toggle")]
        toggles: Vec<String>,
        /// Create a new label and select it.
        #[arg(long)]
        create: Option<String>,
        #[arg(long, default_value = "blue")]
        color: LabelColor,
    },
    Create {
        name: String,
        #[arg(long, default_value = "blue")]
        color: LabelColor,
    },
    Update {
        label_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<LabelColor>,
    },
    Delete {
        label_id: String,
    },
    AddSub {
        label_id: String,
        name: String,
    },
    RenameSub {
        label_id: String,
        sub_label_id: String,
        name: String,
    },
    RemoveSub {
        label_id: String,
        sub_label_id: String,
    },
}

#[derive(Args, Debug)]
struct SendArgs {
    chat_id: String,
    text: Option<String>,
    /// Attach a file; the text becomes its caption.
    #[arg(long, conflicts_with = "voice")]
    file: Option<PathBuf>,
    /// MIME type of --file; guessed from the extension when absent.
    #[arg(long, requires = "file")]
    mime: Option<String>,
    /// Send an audio file as a voice note.
    #[arg(long)]
    voice: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show,
    /// Set the theme, or toggle it when no mode is given.
    Theme { mode: Option<ThemeMode> },
    Accent { color: AccentColor },
    /// Show the API base URL, or set it. An empty value restores the default.
    ApiUrl { url: Option<String> },
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    if let Err(e) = dotenv {
        debug!(error = %e, "no .env loaded");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", describe(&e));
            if e.retryable() {
                eprintln!("(temporary failure; try again)");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut store = LocalStore::open(&cli.store)?;

    match cli.command {
        Command::Chats { tab, search, label, json } => {
            run_chats(&MemoryRepository::load(&store), tab, &search, label.as_deref(), json)
        }
        Command::Show { chat_id } => run_show(&MemoryRepository::load(&store), &chat_id),
        Command::Labels(labels) => {
            let repo = MemoryRepository::load(&store);
            if run_labels(&repo, labels.command)? {
                repo.persist(&mut store)?;
            }
            Ok(())
        }
        Command::Send(args) => {
            let repo = Arc::new(MemoryRepository::load(&store));
            run_send(repo.clone(), args).await?;
            Ok(repo.persist(&mut store)?)
        }
        Command::Calc { inputs, keys, history } => run_calc(&inputs, keys, history),
        Command::Convert { value, from, to } => {
            run_convert(&value, from, to);
            Ok(())
        }
        Command::Stopwatch { duration_ms, lap_every_ms } => run_stopwatch(duration_ms, lap_every_ms).await,
        Command::Solve { problem } => run_solve(&store, &problem.join(" ")).await,
        Command::Settings(settings) => run_settings(&mut store, settings.command),
        Command::Reset => {
            MemoryRepository::seeded().persist(&mut store)?;
            println!("restored seed data");
            Ok(())
        }
    }
}

// =============================================================================
// CHATS
// =============================================================================

fn run_chats(
    repo: &dyn ChatRepository,
    tab: ChatTab,
    search: &str,
    label: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let chats = repo.chats();
    let labels = repo.labels();
    let mut visible = filter::filter_chats(&chats, tab, search);
    if let Some(label_id) = label {
        visible.retain(|chat| chat.has_label(label_id));
    }
    let rows: Vec<_> = visible.into_iter().map(|chat| filter::summarize(chat, &labels)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("no chats on the {tab} tab match");
    }
    for row in rows {
        let pill = row.pill().map(|l| format!(" [{}]", l.name)).unwrap_or_default();
        let time = row.time.as_deref().unwrap_or("--:--");
        println!("{time}  {:<4} {}{pill}", row.chat_id, row.name);
        println!("       {}", row.preview);
    }
    Ok(())
}

fn run_show(repo: &dyn ChatRepository, chat_id: &str) -> Result<(), CliError> {
    let chat = repo.chat(chat_id).ok_or_else(|| StoreError::UnknownChat(chat_id.to_owned()))?;
    println!("{} ({})", filter::display_name(&chat), chat.id);
    for message in &chat.messages {
        let sender = repo.user(&message.sender_id).map_or_else(|| message.sender_id.clone(), |u| u.name);
        let attachment = message.file_name.as_deref().map(|f| format!(" <{} {f}>", message.kind.as_str())).unwrap_or_default();
        println!("{}  {sender}: {}{attachment}", filter::format_clock(message.timestamp), message.content);
    }
    Ok(())
}

// =============================================================================
// LABELS
// =============================================================================

/// Returns whether the repository changed.
fn run_labels(repo: &dyn ChatRepository, command: LabelsSubcommand) -> Result<bool, CliError> {
    if let LabelsSubcommand::List = command {
        let chats = repo.chats();
        for label in repo.labels() {
            println!("{:<6} {:<16} {:<8} {} chats", label.id, label.name, label.color.name(), filter::label_chat_count(&chats, &label.id));
            for sub in &label.sub_labels {
                println!("  {:<6} {}", sub.id, sub.name);
            }
        }
        return Ok(false);
    }

    if let LabelsSubcommand::Assign { chat_id, toggles, create, color } = command {
        let mut selection = LabelSelection::open(repo, &chat_id)?;
        for label_id in &toggles {
            let on = selection.toggle(label_id);
            debug!(%chat_id, %label_id, on, "cli: label toggled");
        }
        if let Some(name) = create {
            let label = selection.create_label(repo, &name, color)?;
            println!("created {} {}", label.id, label.name);
        }
        let stored = selection.save(repo)?;
        println!("{chat_id}: {}", if stored.is_empty() { "(no labels)".to_owned() } else { stored.join(", ") });
        return Ok(true);
    }

    let mut editor = LabelEditor::open(repo);
    match command {
        LabelsSubcommand::Create { name, color } => {
            let label = editor.add_label(&name, color)?;
            println!("created {} {}", label.id, label.name);
        }
        LabelsSubcommand::Update { label_id, name, color } => {
            let current = repo.label(&label_id).ok_or_else(|| StoreError::UnknownLabel(label_id.clone()))?;
            editor.update_label(&label_id, name.as_deref().unwrap_or(&current.name), color.unwrap_or(current.color))?;
        }
        LabelsSubcommand::Delete { label_id } => {
            let label = editor.delete_label(&label_id)?;
            println!("deleted {} {}", label.id, label.name);
        }
        LabelsSubcommand::AddSub { label_id, name } => {
            let sub = editor.add_sub_label(&label_id, &name)?;
            println!("created {} {}", sub.id, sub.name);
        }
        LabelsSubcommand::RenameSub { label_id, sub_label_id, name } => {
            editor.rename_sub_label(&label_id, &sub_label_id, &name)?;
        }
        LabelsSubcommand::RemoveSub { label_id, sub_label_id } => {
            let sub = editor.remove_sub_label(&label_id, &sub_label_id)?;
            println!("removed {} {}", sub.id, sub.name);
        }
        LabelsSubcommand::List | LabelsSubcommand::Assign { .. } => return Ok(false),
    }
    let removed = editor.save(repo);
    if !removed.is_empty() {
        info!(removed = ?removed, "cli: labels removed from chats");
    }
    Ok(true)
}

// =============================================================================
// SEND
// =============================================================================

async fn run_send(repo: Arc<MemoryRepository>, args: SendArgs) -> Result<(), CliError> {
    let service = MessageService::new(repo);
    let text = args.text.unwrap_or_default();

    let message = if let Some(path) = args.voice {
        let mut recorder = VoiceRecorder::new(FileCapture::new(path));
        recorder.start().await?;
        let secs = recorder.recording_secs();
        let clip = recorder.stop().await?.ok_or(CliError::NoRecording)?;
        debug!(file = %clip.file_name, elapsed = %format_recording_time(secs), "cli: voice clip captured");
        service.send_voice_note(&args.chat_id, &clip)?
    } else if let Some(path) = args.file {
        let attachment = attachment_for(&path, args.mime)?;
        service.send_attachment(&args.chat_id, &attachment, &text)?
    } else if text.trim().is_empty() {
        return Err(CliError::NothingToSend);
    } else {
        service.send_text(&args.chat_id, &text)?
    };

    println!("sent {} ({}) to {}", message.id, message.kind.as_str(), args.chat_id);
    Ok(())
}

fn attachment_for(path: &Path, mime: Option<String>) -> Result<Attachment, CliError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidPath(path.display().to_string()))?
        .to_owned();
    let mime_type = mime.unwrap_or_else(|| guess_mime(path).to_owned());
    Ok(Attachment { file_name, mime_type, media_url: path.display().to_string() })
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// TOOLS
// =============================================================================

fn run_calc(inputs: &[String], keys: bool, show_history: bool) -> Result<(), CliError> {
    let mut calc = Calculator::new();
    if keys {
        for label in inputs {
            calc.press_label(label);
        }
        println!("{}", calc.display());
    } else {
        for expression in inputs {
            calc.submit(expression);
            println!("{}", calc.display());
            if let Some(err) = calc.error() {
                return Err(err.clone().into());
            }
        }
    }
    if show_history {
        for entry in calc.history() {
            println!("  {entry}");
        }
    }
    match calc.error() {
        Some(err) => Err(err.clone().into()),
        None => Ok(()),
    }
}

fn run_convert(raw: &str, from: TemperatureUnit, to: TemperatureUnit) {
    let value = convert::parse_temperature_input(raw);
    let result = convert::convert(value, from, to);
    println!("{value} {} = {result:.2} {}", from.symbol(), to.symbol());
    println!("formula: {}", convert::formula(from, to));
}

async fn run_stopwatch(duration_ms: u64, lap_every_ms: Option<u64>) -> Result<(), CliError> {
    let mut stopwatch = Stopwatch::new();
    stopwatch.start()?;

    let step = lap_every_ms.filter(|&ms| ms > 0).unwrap_or(duration_ms);
    let mut waited = 0;
    while waited < duration_ms {
        let wait = step.min(duration_ms - waited);
        tokio::time::sleep(Duration::from_millis(wait)).await;
        waited += wait;
        if lap_every_ms.is_some() && waited < duration_ms {
            let lap = stopwatch.lap()?;
            println!("lap {:>2}  {}  +{}", lap.id, format_time(lap.time), format_time(lap.diff));
        }
    }

    stopwatch.stop();
    println!("total   {}", format_time(stopwatch.elapsed_ms()));
    Ok(())
}

async fn run_solve(store: &LocalStore, problem: &str) -> Result<(), CliError> {
    if problem.trim().is_empty() {
        return Err(CliError::EmptyProblem);
    }
    let config = LlmConfig::from_env()?;
    let base_url = settings::api_base_url(store, &config.base_url);
    let client = LlmClient::from_config(config.with_base_url(&base_url))?;
    info!(model = client.model(), "cli: solving");

    let solver = MathSolver::new(Arc::new(client));
    let answer = solver.solve(problem).await.ok_or(CliError::EmptyProblem)?;
    println!("{answer}");
    Ok(())
}

// =============================================================================
// SETTINGS
// =============================================================================

fn run_settings(store: &mut LocalStore, command: SettingsSubcommand) -> Result<(), CliError> {
    let current = AppSettings::load(store);
    let updated = match command {
        SettingsSubcommand::Show => {
            println!("theme   {}", current.theme);
            println!("accent  {}", current.accent);
            println!("api-url {}", settings::api_base_url(store, &default_api_base_url()));
            return Ok(());
        }
        SettingsSubcommand::Theme { mode } => {
            let theme = mode.unwrap_or_else(|| current.theme.toggled());
            AppSettings::update(store, SettingsPatch { theme: Some(theme), accent: None })?
        }
        SettingsSubcommand::Accent { color } => {
            AppSettings::update(store, SettingsPatch { theme: None, accent: Some(color) })?
        }
        SettingsSubcommand::ApiUrl { url: None } => {
            println!("{}", settings::api_base_url(store, &default_api_base_url()));
            return Ok(());
        }
        SettingsSubcommand::ApiUrl { url: Some(url) } => {
            let saved = settings::set_api_base_url(store, &url, &default_api_base_url())?;
            println!("api-url {saved}");
            return Ok(());
        }
    };
    println!("theme {} / accent {}", updated.theme, updated.accent);
    Ok(())
}

/// Base URL of the configured provider, or the Gemini default when the
/// model config is incomplete.
fn default_api_base_url() -> String {
    LlmConfig::from_env().map_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_owned(), |config| config.base_url)
}
