use std::path::PathBuf;

use physbox_editor_lib::session::EditorSession;
use physbox_editor_lib::state::EditorSettings;
use physbox_editor_lib::validation::SceneValidator;

/// Command-line options of the headless runner
#[derive(Debug, Default)]
struct RunArgs {
    scene: Option<PathBuf>,
    steps: usize,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    /// Start from the autosave file when no scene is given
    recover: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "physbox_editor=info".into()),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "usage: physbox-editor [--scene <path> | --recover] [--steps N] [--out <path>] [--config <path>]"
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), String> {
    let settings = match &args.config {
        Some(path) => EditorSettings::load_from(path).map_err(|e| e.to_string())?,
        None => EditorSettings::load(),
    };
    let mut session = EditorSession::headless(settings);

    if let Some(path) = &args.scene {
        session.load_file(path).map_err(|e| format!("{}: {e}", path.display()))?;
    } else if args.recover {
        if session.recover_autosave() {
            tracing::info!("Recovered autosaved scene");
        } else {
            tracing::warn!("No usable autosave, starting empty");
        }
    }

    session.run_steps(args.steps);
    tracing::info!(
        "Ran {} step(s) over {} object(s)",
        args.steps,
        session.scene().objects().len()
    );

    for problem in SceneValidator::new(&session).validate_all() {
        tracing::warn!("{problem}");
    }

    match &args.out {
        Some(path) => session.save_file(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => println!("{}", session.export_json().map_err(|e| e.to_string())?),
    }
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<RunArgs, String> {
    let mut parsed = RunArgs::default();
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--scene" => parsed.scene = Some(PathBuf::from(value()?)),
            "--out" => parsed.out = Some(PathBuf::from(value()?)),
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--recover" => parsed.recover = true,
            "--steps" => {
                let raw = value()?;
                parsed.steps = raw
                    .parse()
                    .map_err(|_| format!("--steps expects a number, got {raw}"))?;
            }
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(parsed)
}
