use argh::FromArgs;
use shell_kit::{CommandSpec, Flow, Shell, ShellConfig};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Interactive shell with session variables and online help.
struct Args {
    #[argh(option, default = "shell_kit::DEFAULT_PROMPT.to_string()")]
    /// text shown before every line
    prompt: String,

    #[argh(switch)]
    /// start without exit, clear, gset, gget, gsets and help
    no_builtins: bool,
}

fn scan_mode() -> CommandSpec {
    CommandSpec::from_fn(|_, shell, _| {
        shell.set_prompt("scan> ");
        Ok(Flow::Continue)
    })
    .with_help("Activate scan mode")
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ShellConfig::default()
        .with_prompt(args.prompt)
        .with_command("scanmode", scan_mode());
    if args.no_builtins {
        config = config.without_builtins();
    }

    Shell::new(config).run()?;
    Ok(())
}
