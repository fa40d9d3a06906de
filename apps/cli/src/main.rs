use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use md2rtf_clipboard::{ClipboardBackend, MemoryClipboard, SystemClipboard};
use md2rtf_core::{Input, Output, Pipeline};
use output::{OutputFormat, Renderer, Stream};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "md2rtf",
    version,
    about = "Convert Markdown on the clipboard into RTF that pastes into Word with template styles."
)]
struct Cli {
    /// Settings file (TOML). Defaults to `config.toml` in the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print the Markdown input and the generated RTF.
    #[arg(long, global = true)]
    debug: bool,
    /// Renderer for the completion report.
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Disable ANSI colors in CLI output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Suppress the completion report.
    #[arg(long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
enum Command {
    /// Convert Markdown to RTF (the default when no subcommand is given).
    Convert(ConvertArgs),
    /// List the paragraph styles the destination template must define.
    Styles,
    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args, Clone, Default)]
struct ConvertArgs {
    /// Read Markdown from a file (`-` for stdin) instead of the clipboard.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Print the RTF to stdout instead of writing it to the clipboard.
    #[arg(long)]
    stdout: bool,
    /// Exit right after writing the clipboard. On Linux the RTF is lost unless a clipboard
    /// manager already took it over.
    #[arg(long)]
    no_wait: bool,
}

impl Cli {
    fn color_enabled(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_tracing(&cli) {
        eprintln!("{error:#}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_failure(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let renderer = Renderer::new(cli.format, cli.color_enabled());
    match cli.command.clone().unwrap_or(Command::Convert(ConvertArgs::default())) {
        Command::Convert(args) => handle_convert(&args, cli, &renderer),
        Command::Styles => renderer.styles(),
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "md2rtf", &mut io::stdout());
            Ok(())
        }
    }
}

fn handle_convert(args: &ConvertArgs, cli: &Cli, renderer: &Renderer) -> Result<()> {
    let config = settings::load(cli.config.as_deref(), cli.debug.then_some(true), None)?;

    let input = match &args.input {
        Some(path) => Input::Text(read_input(path)?),
        None => Input::Clipboard,
    };
    let output = if args.stdout {
        Output::Return
    } else {
        Output::Clipboard
    };

    let mut clipboard: Box<dyn ClipboardBackend> =
        if input == Input::Clipboard || output == Output::Clipboard {
            Box::new(SystemClipboard::open().context("failed to open the system clipboard")?)
        } else {
            debug!(target: "md2rtf_cli", "clipboard not needed for this run");
            Box::new(MemoryClipboard::new())
        };

    let conversion = Pipeline::new(&config)
        .with_echo(Stream::for_output(output).writer())
        .run(clipboard.as_mut(), input, output)?;
    info!(
        target: "md2rtf_cli",
        paragraphs = conversion.stats.paragraphs,
        "conversion finished"
    );

    if args.stdout {
        println!("{}", conversion.rtf);
    }
    if !cli.quiet {
        renderer.conversion(&conversion.stats, output)?;
    }
    hand_off_clipboard(clipboard.as_mut(), output, !args.no_wait)
}

/// Keeps a written clipboard alive after exit. Blocks on Linux until another client owns it.
fn hand_off_clipboard(
    clipboard: &mut dyn ClipboardBackend,
    output: Output,
    wait: bool,
) -> Result<()> {
    if output != Output::Clipboard || !wait {
        return Ok(());
    }
    if cfg!(target_os = "linux") {
        info!(
            target: "md2rtf_cli",
            "holding the clipboard until another application takes it over"
        );
    }
    clipboard
        .persist()
        .context("failed to hand the clipboard over")
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read Markdown from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn report_failure(error: &anyhow::Error) {
    eprintln!("- Some major error somewhere.");
    eprintln!("- Try to backtrace...");
    eprintln!("- {error:#}");
    eprintln!("Exiting... (shutting down process)");
    eprintln!();
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let default_filter = if cli.debug {
        "debug"
    } else {
        "warn,md2rtf_cli=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .without_time()
        .with_ansi(cli.color_enabled() && io::stderr().is_terminal())
        .compact()
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize logging: {error}"))
}

mod settings {
    use std::path::Path;

    use anyhow::{Context, Result};
    use config::{Config, Environment, File, Map};
    use directories::ProjectDirs;
    use md2rtf_core::RtfConfig;
    use tracing::debug;

    pub const ENV_PREFIX: &str = "MD2RTF";

    /// Builds the conversion settings from, in increasing priority: built-in defaults, the
    /// settings file, `MD2RTF_*` environment variables and the `--debug` flag.
    ///
    /// `env` replaces the process environment when given.
    pub fn load(
        path: Option<&Path>,
        debug_override: Option<bool>,
        env: Option<Map<String, String>>,
    ) -> Result<RtfConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&RtfConfig::default()).context("invalid built-in settings")?,
        );

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                if let Some(dirs) = ProjectDirs::from("com", "md2rtf", "md2rtf") {
                    let default_path = dirs.config_dir().join("config.toml");
                    debug!(
                        target: "md2rtf_cli",
                        path = %default_path.display(),
                        "looking for settings file"
                    );
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        builder = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("debug", debug_override)
            .context("invalid --debug override")?;

        let config: RtfConfig = builder
            .build()
            .context("failed to load settings")?
            .try_deserialize()
            .context("invalid settings")?;
        config.validate().context("invalid settings")?;
        Ok(config)
    }

}

mod output {
    use std::io::{self, Write};

    use anyhow::Result;
    use clap::ValueEnum;
    use md2rtf_core::{ConversionStats, Output, STYLE_SHEET};
    use serde_json::json;

    const BLUE: &str = "\x1b[34m";
    const RESET: &str = "\x1b[0m";

    #[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
    pub enum OutputFormat {
        Json,
        Text,
    }

    /// Where reports and the debug echo go. Stdout is reserved for the document when the RTF
    /// is printed, so everything else moves to stderr.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub enum Stream {
        Stdout,
        Stderr,
    }

    impl Stream {
        pub fn for_output(output: Output) -> Self {
            match output {
                Output::Clipboard => Self::Stdout,
                Output::Return => Self::Stderr,
            }
        }

        pub fn writer(self) -> Box<dyn Write> {
            match self {
                Self::Stdout => Box::new(io::stdout()),
                Self::Stderr => Box::new(io::stderr()),
            }
        }
    }

    #[derive(Copy, Clone, Debug)]
    pub struct Renderer {
        format: OutputFormat,
        color: bool,
    }

    impl Renderer {
        pub fn new(format: OutputFormat, color: bool) -> Self {
            Self { format, color }
        }

        /// Reports a finished conversion on the stream [`Stream::for_output`] picks.
        pub fn conversion(&self, stats: &ConversionStats, destination: Output) -> Result<()> {
            let mut out = Stream::for_output(destination).writer();
            match self.format {
                OutputFormat::Json => {
                    let payload = json!({
                        "destination": match destination {
                            Output::Clipboard => "clipboard",
                            Output::Return => "stdout",
                        },
                        "stats": stats,
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
                }
                OutputFormat::Text => {
                    let message = match destination {
                        Output::Clipboard => "Ready to paste into Word",
                        Output::Return => "RTF written to stdout",
                    };
                    writeln!(out, "{}", self.paint(message))?;
                }
            }
            Ok(())
        }

        pub fn styles(&self) -> Result<()> {
            match self.format {
                OutputFormat::Json => {
                    let styles: Vec<_> = STYLE_SHEET
                        .iter()
                        .map(|(style, name)| {
                            json!({
                                "index": style.index(),
                                "control_word": style.to_string(),
                                "name": name,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&styles)?);
                }
                OutputFormat::Text => {
                    for (style, name) in STYLE_SHEET {
                        println!("{:<4} {name}", style.to_string());
                    }
                }
            }
            Ok(())
        }

        fn paint(&self, text: &str) -> String {
            if self.color {
                format!("{BLUE}{text}{RESET}")
            } else {
                text.to_string()
            }
        }
    }

}
