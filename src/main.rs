//! Dengue risk entrypoint: loads the artifact bundle once, then serves one
//! interactive session over stdin. Missing artifacts stop the process;
//! every other failure is reported and the session continues.

use dengue_risk::{
    artifacts,
    config::AppConfig,
    export,
    features::{FeatureVector, Table, FEATURES},
    logging::StructuredLogger,
    reference::{self, Insights},
    risk::RiskEngine,
    session::Session,
    PipelineError,
};
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

const HELP: &str = "\
commands:
  predict [field=value ...]   predict one record (unset fields use range midpoints)
  batch <in.csv> [out.csv]    predict every row of a CSV file
  template [path]             write the input template (default template.csv)
  history [path]              show or export this session's predictions
  clear                       clear prediction history
  importance                  feature importance, highest first
  insights                    compare the last input with the reference dataset
  fields                      list fields with recommended ranges
  help | quit";

fn predict_command(engine: &RiskEngine, session: &mut Session, args: &[&str]) -> Result<(), PipelineError> {
    let mut input = FeatureVector::midpoints();
    for arg in args {
        let (name, raw) = arg
            .split_once('=')
            .ok_or_else(|| PipelineError::Schema(format!("expected field=value, got '{}'", arg)))?;
        input.set_text(name, raw)?;
    }
    let outside = input.out_of_range();
    if !outside.is_empty() {
        warn!(fields = ?outside, "values outside recommended range");
    }
    let label = session.predict(engine, input)?;
    println!("Predicted Risk Level: {}", label);
    Ok(())
}

fn batch_command(engine: &RiskEngine, args: &[&str]) -> Result<(), PipelineError> {
    let input = args
        .first()
        .ok_or_else(|| PipelineError::Schema("usage: batch <in.csv> [out.csv]".to_string()))?;
    let table = Table::from_path(Path::new(input))?;
    let results = engine.predict_table(table)?;
    let download = export::batch_results(&results)?;
    let out = args.get(1).copied().unwrap_or(download.file_name);
    download.write_to(Path::new(out))?;
    println!("{} rows predicted, results written to {}", results.len(), out);
    Ok(())
}

fn history_command(session: &Session, args: &[&str]) -> Result<(), PipelineError> {
    if session.history().is_empty() {
        println!("no predictions yet");
        return Ok(());
    }
    let download = export::history(session.history())?;
    match args.first() {
        Some(path) => {
            download.write_to(Path::new(path))?;
            println!("{} predictions written to {}", session.history().len(), path);
        }
        None => print!("{}", download.contents),
    }
    Ok(())
}

fn insights_command(config: &AppConfig, session: &Session) {
    let Some(input) = session.last_valid_input() else {
        println!("make a successful prediction first");
        return;
    };
    match reference::insights_for(&config.reference, input) {
        Insights::Available(distributions) => {
            for d in distributions {
                let s = &d.summary;
                println!(
                    "{:<10} min {:.2}  q1 {:.2}  median {:.2}  q3 {:.2}  max {:.2}  your input {}",
                    d.feature,
                    s.min,
                    s.q1,
                    s.median,
                    s.q3,
                    s.max,
                    d.input.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string()),
                );
            }
        }
        Insights::Unavailable(reason) => println!("Unable to load dataset for visualization: {}", reason),
    }
}

/// Run one command; returns false on quit.
fn dispatch(config: &AppConfig, engine: &RiskEngine, session: &mut Session, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return true;
    };
    let args: Vec<&str> = parts.collect();
    let result = match cmd {
        "predict" => predict_command(engine, session, &args),
        "batch" => batch_command(engine, &args),
        "template" => export::template().and_then(|t| {
            let path = args.first().copied().unwrap_or(t.file_name);
            t.write_to(Path::new(path))?;
            println!("template written to {}", path);
            Ok(())
        }),
        "history" => history_command(session, &args),
        "clear" => {
            session.clear_history();
            Ok(())
        }
        "importance" => {
            for fi in engine.ranked_importances() {
                println!("{:<18} {:.4}", fi.feature, fi.importance);
            }
            Ok(())
        }
        "insights" => {
            insights_command(config, session);
            Ok(())
        }
        "fields" => {
            for f in FEATURES.iter() {
                println!("{:<18} {} to {} (step {})", f.name, f.min, f.max, f.step);
            }
            Ok(())
        }
        "help" => {
            println!("{}", HELP);
            Ok(())
        }
        "quit" | "exit" => return false,
        other => {
            println!("unknown command '{}'; try help", other);
            Ok(())
        }
    };
    if let Err(e) = result {
        let prefix = if cmd == "batch" { "Batch Processing Error" } else { "Prediction Error" };
        println!("{}: {}", prefix, e.user_message());
    }
    true
}

fn main() -> ExitCode {
    let config_path = std::env::var("DENGUE_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = AppConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(artifacts_dir = ?config.artifacts.dir, "dengue risk starting");

    let artifacts = match artifacts::load_once(&config.artifacts) {
        Ok(a) => a,
        Err(e) => {
            error!(error = %e, "cannot serve predictions");
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };
    let engine = RiskEngine::new(artifacts);
    let mut session = Session::new();
    info!(session_id = %session.id(), "session started");

    println!("{}", HELP);
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if !dispatch(&config, &engine, &mut session, line.trim()) {
            break;
        }
    }

    info!(session_id = %session.id(), predictions = session.history().len(), "session ended");
    ExitCode::SUCCESS
}
